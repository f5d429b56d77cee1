use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Izinja,
    Pawtopia,
}

/// Random dog media, in your terminal
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "The path to the config file. The default is `izinja.toml`."
    )]
    pub config: Option<String>,

    #[arg(short, long, value_enum, help = "Use a built-in brand instead of the configured one.")]
    pub preset: Option<Preset>,

    #[arg(long, help = "Do not fetch a joke after each media item.")]
    pub no_jokes: bool,

    #[arg(long, help = "Treat `.MP4` and `.WebM` as videos too.")]
    pub ignore_case: bool,

    #[arg(
        long,
        help = "Show whichever request finishes last, even if a newer one was already shown."
    )]
    pub last_completed_wins: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["izinja", "--preset", "pawtopia", "--no-jokes", "-c", "x.toml"]);
        assert_eq!(cli.preset, Some(Preset::Pawtopia));
        assert!(cli.no_jokes);
        assert!(!cli.ignore_case);
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
    }
}
