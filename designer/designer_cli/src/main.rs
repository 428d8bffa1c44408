use anyhow::Context;
use clap::Parser;
use labware_calibration::protocol_labware::ProtocolLabware;
use labware_calibration::reconcile::labware_summaries;
use labware_calibration::record::LabwareCalibration;
use serde::Serialize;
use shared_data::labware::LabwareEntities;
use shared_data::module::ModulesBySlot;
use shared_data::pipette::PipetteEntities;
use step_forms::form::{FormData, FormPatch};
use step_forms::handle_form_change::handle_form_change;
use tracing::info;
use util::source::JsonSource;

use crate::opts::{Command, Opts};

mod opts;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX)?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    match opts.command {
        Command::ResolvePatch {
            form,
            patch,
            pipettes,
            labware,
        } => {
            let form: FormData = load(&form, "form")?;
            let patch: FormPatch = load(&patch, "patch")?;
            let pipettes: PipetteEntities = load(&pipettes, "pipettes")?;
            let labware: LabwareEntities = load(&labware, "labware")?;

            let resolved = handle_form_change(patch, &form, &pipettes, &labware);
            info!("Resolved patch. fields: {}", resolved.len());

            print_json(&resolved)
        }
        Command::LabwareSummary {
            labware,
            calibrations,
            modules,
        } => {
            let labware: Vec<ProtocolLabware> = load(&labware, "protocol labware")?;
            let calibrations: Vec<LabwareCalibration> = load(&calibrations, "calibrations")?;
            let modules: ModulesBySlot = match modules {
                Some(modules) => load(&modules, "modules")?,
                None => ModulesBySlot::new(),
            };

            let summaries = labware_summaries(&labware, &calibrations, &modules);
            info!("Summarized labware. labware: {}, summaries: {}", labware.len(), summaries.len());

            print_json(&summaries)
        }
    }
}

fn load<T: serde::de::DeserializeOwned>(source: &JsonSource, kind: &str) -> anyhow::Result<T> {
    source
        .load()
        .with_context(|| format!("Unable to load {}. source: {}", kind, source))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(value).context("Unable to serialize output")?;
    println!("{}", content);

    Ok(())
}
