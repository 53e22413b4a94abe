use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    snipkit completions bash > ~/.bash_completion.d/snipkit\n\n\
                  Generate zsh completions:\n    snipkit completions zsh > ~/.zfunc/_snipkit\n\n\
                  Generate fish completions:\n    snipkit completions fish > ~/.config/fish/completions/snipkit.fish\n\n\
                  Generate PowerShell completions:\n    snipkit completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
