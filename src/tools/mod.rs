//! Functions invoked by the subcommands.

pub mod bed;
pub mod stats;

const TEMPLATE_SUBCMD: &str = "
USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{unified}";
