#![deny(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use util::source::JsonSource;

#[derive(Parser, Debug)]
#[command(name = "designer_cli")]
#[command(bin_name = "designer_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Trace log file
    #[arg(long, num_args = 0..=1, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Resolve the dependent fields of a step form edit
    ResolvePatch {
        /// Step form, JSON
        #[arg(long, value_name = "FORM_FILE")]
        form: JsonSource,

        /// Edited fields, JSON
        #[arg(long, value_name = "PATCH_FILE")]
        patch: JsonSource,

        /// Pipette entities, keyed by pipette id, JSON
        #[arg(long, value_name = "PIPETTES_FILE")]
        pipettes: JsonSource,

        /// Labware entities, keyed by labware id, JSON
        #[arg(long, value_name = "LABWARE_FILE")]
        labware: JsonSource,
    },

    /// Summarize protocol labware with its calibration
    LabwareSummary {
        /// Protocol labware reported by the robot, JSON
        #[arg(long, value_name = "LABWARE_FILE")]
        labware: JsonSource,

        /// Labware calibration records, JSON
        #[arg(long, value_name = "CALIBRATIONS_FILE")]
        calibrations: JsonSource,

        /// Modules, keyed by slot, JSON
        #[arg(long, value_name = "MODULES_FILE")]
        modules: Option<JsonSource>,
    },
}
