use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show component information:\n    snipkit show dialog\n\n\
                  Machine-readable output:\n    snipkit show dialog --json")]
pub struct ShowArgs {
    /// Component name
    pub name: String,

    /// Print the component as JSON
    #[arg(long)]
    pub json: bool,
}
