use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all registry components:\n    snipkit list\n\n\
                  List one category:\n    snipkit list --category ui\n\n\
                  Machine-readable output:\n    snipkit list --json")]
pub struct ListArgs {
    /// Only list components in this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}
