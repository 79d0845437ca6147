//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "warpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the project file
    #[arg(short, long, global = true, default_value = "warpack.toml", value_name = "FILE")]
    pub project: PathBuf,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a WAR archive from compiled output, sources and resources
    War(BuildArgs),
    /// Build a WAR archive that also bundles dependency jars
    Uberwar(BuildArgs),
    /// Print the generated deployment descriptor (web.xml)
    WebXml,
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::War(_) => "war",
            Self::Uberwar(_) => "uberwar",
            Self::WebXml => "web-xml",
            Self::Completion { .. } => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct BuildArgs {
    /// Run the configured compile command before assembly (default)
    #[arg(long, overrides_with = "no_compile")]
    pub compile: bool,

    /// Skip the compile command; classes must already exist
    #[arg(long, overrides_with = "compile")]
    pub no_compile: bool,

    /// Override the archive file name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

impl BuildArgs {
    /// Whether the compile command should run.
    pub const fn should_compile(&self) -> bool {
        !self.no_compile || self.compile
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compile_flags() {
        let cli = Cli::try_parse_from(["warpack", "war"]).unwrap();
        let Commands::War(args) = cli.command else {
            panic!("expected war");
        };
        assert!(args.should_compile());

        let cli = Cli::try_parse_from(["warpack", "war", "--no-compile"]).unwrap();
        let Commands::War(args) = cli.command else {
            panic!("expected war");
        };
        assert!(!args.should_compile());

        let cli = Cli::try_parse_from(["warpack", "uberwar", "--no-compile", "--compile"]).unwrap();
        let Commands::Uberwar(args) = cli.command else {
            panic!("expected uberwar");
        };
        assert!(args.should_compile());
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["warpack", "web-xml", "--project", "app/warpack.toml", "-v"])
                .unwrap();
        assert_eq!(cli.project, PathBuf::from("app/warpack.toml"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::WebXml));

        assert!(Cli::try_parse_from(["warpack", "war", "-v", "-q"]).is_err());
    }
}
