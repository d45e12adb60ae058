use crate::cli::{Cli, Commands};
use crate::commands::wizard;
use crate::domain::catalog::ZoneCatalog;
use crate::domain::models::{AnswerEntry, CompletenessMode, ConfigFile, ResponsePatch, ZoneInfo};
use crate::services::encoder::XlsxEncoder;
use crate::services::ledger::ResponseLedger;
use crate::services::output::{emit, emit_list};
use crate::services::session::InspectionSession;
use crate::services::storage::audit;
use crate::services::upload::DEFAULT_ENDPOINT;
use std::path::Path;

pub fn handle_command(cli: &Cli, config: &ConfigFile) -> anyhow::Result<()> {
    let catalog = ZoneCatalog::standard();
    let endpoint = resolve_endpoint(cli, config);

    match &cli.command {
        Commands::Zones => {
            let zones: Vec<ZoneInfo> = catalog
                .zones()
                .iter()
                .map(|name| ZoneInfo {
                    name: name.to_string(),
                    title: catalog.title(name),
                    sections: catalog
                        .sections(name)
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                })
                .collect();
            emit_list(cli.json, &zones, |z| {
                format!("{}\t{}\t{}", z.name, z.title, z.sections.join(", "))
            })
        }
        Commands::Questions => {
            let questions: Vec<String> = catalog
                .questions()
                .iter()
                .map(|q| q.to_string())
                .collect();
            emit_list(cli.json, &questions, |q| q.clone())
        }
        Commands::Check {
            zone,
            answers,
            count_based,
        } => {
            let mut ledger = ResponseLedger::new();
            for entry in load_answers(answers)? {
                ledger.update(
                    &entry.section,
                    &entry.question,
                    ResponsePatch {
                        answer: entry.answer,
                        comment: entry.comment,
                    },
                );
            }
            let report = ledger.completeness(&catalog, zone, completeness_mode(config, *count_based));
            emit(cli.json, &report, |r| {
                let mut out = format!(
                    "zona: {}\nrespondidas: {}/{}\ncompleta: {}",
                    r.zone,
                    r.answered,
                    r.expected,
                    if r.complete { "si" } else { "no" }
                );
                for key in &r.missing {
                    out.push_str(&format!("\nfalta: {} - {}", key.section, key.question));
                }
                out
            })
        }
        Commands::Inspect {
            inspector,
            date,
            zone,
            answers,
            out,
            count_based,
        } => {
            let mut session = InspectionSession::start(
                inspector,
                date,
                zone,
                completeness_mode(config, *count_based),
            )?;
            session.apply_entries(&load_answers(answers)?);
            let encoder = XlsxEncoder;
            match out {
                Some(path) => {
                    let report = session.render(&catalog, &encoder)?;
                    std::fs::write(path, &report.bytes)?;
                    audit(
                        "export",
                        serde_json::json!({
                            "zone": &session.meta.zone,
                            "file": &report.file_name,
                            "path": path.to_string_lossy(),
                        }),
                    );
                    emit(
                        cli.json,
                        &serde_json::json!({
                            "file": &report.file_name,
                            "path": path.to_string_lossy(),
                        }),
                        |_| format!("reporte {} escrito en {}", report.file_name, path.display()),
                    )
                }
                None => {
                    let receipt = session.finalize(&catalog, &encoder, &endpoint)?;
                    emit(cli.json, &receipt, |r| {
                        format!("{} ({})", r.message, r.file_name)
                    })
                }
            }
        }
        Commands::Wizard => wizard::run(&catalog, &endpoint, completeness_mode(config, false)),
    }
}

fn resolve_endpoint(cli: &Cli, config: &ConfigFile) -> String {
    cli.endpoint
        .clone()
        .or_else(|| config.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

fn completeness_mode(config: &ConfigFile, count_based: bool) -> CompletenessMode {
    if count_based || config.count_based_completeness {
        CompletenessMode::CountBased
    } else {
        CompletenessMode::PerKey
    }
}

fn load_answers(path: &Path) -> anyhow::Result<Vec<AnswerEntry>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
