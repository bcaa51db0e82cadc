use clap::{crate_version, App, AppSettings, ArgMatches};

use crate::tools;

const TEMPLATE: &str = "
{bin} {version}
{about}


USAGE:
    {usage}

SUBCOMMANDS:
{subcommands}

OPTIONS:
{unified}";

const ABOUT: &str = "
xmaptools is a collection of tools for working with transcript annotations
projected across genome assemblies.";


/// Constructs a new `clap::App` for argument parsing.
pub fn build_cli() -> App<'static, 'static> {
    App::new("xmaptools")
        .version(crate_version!())
        .about(ABOUT)
        .template(TEMPLATE)
        .max_term_width(80)
        .settings(&[AppSettings::GlobalVersion,
                    AppSettings::SubcommandRequiredElseHelp,
                    AppSettings::DisableHelpSubcommand,
                    AppSettings::VersionlessSubcommands])
        .subcommand(tools::bed::build_cli())
        .subcommand(tools::stats::build_cli())
}

/// Runs the appropriate tool given the subcommand argument matches.
pub fn run(matches: ArgMatches) -> xmap::Result<()> {
    match matches.subcommand() {
        (tools::bed::NAME, Some(m)) => tools::bed::run(m),
        (tools::stats::NAME, Some(m)) => tools::stats::run(m),
        // We should not reach this point since we already require
        // that subcommands must be present in the app settings.
        _ => Ok(()),
    }
}
