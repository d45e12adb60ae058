//! Interactive two-screen inspection flow on stdin/stdout.
//!
//! Start screen: inspector, date and zone, re-prompted until valid. Checklist
//! screen: every (section, question) pair in catalog order, so the session is
//! complete by construction when finalize runs. Upload errors keep the
//! answers and offer a retry; success returns to the start screen after the
//! cancelable post-success delay. EOF anywhere is a teardown: exit cleanly
//! without acting on a stale session.

use crate::domain::catalog::ZoneCatalog;
use crate::domain::models::{CompletenessMode, ResponsePatch};
use crate::services::encoder::XlsxEncoder;
use crate::services::session::{wait_before_return, InspectionSession, RETURN_DELAY};
use std::io::{self, BufRead, Write};
use std::sync::mpsc;

pub fn run(catalog: &ZoneCatalog, endpoint: &str, mode: CompletenessMode) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let Some(mut session) = start_screen(&mut input, catalog, mode)? else {
            return Ok(());
        };

        println!();
        println!("{}", catalog.title(&session.meta.zone));
        println!(
            "Realizada por: {} el {}",
            session.meta.inspector,
            session.meta.date.spanish_long()
        );

        let sections = catalog.sections(&session.meta.zone);
        if sections.is_empty() {
            println!(
                "Contenido de inspección para \"{}\" no definido.",
                session.meta.zone
            );
            continue;
        }

        if !checklist_screen(&mut input, catalog, &mut session)? {
            return Ok(());
        }

        match finalize_screen(&mut input, catalog, &session, endpoint)? {
            Outcome::BackToStart => continue,
            Outcome::Quit => return Ok(()),
        }
    }
}

enum Outcome {
    BackToStart,
    Quit,
}

fn start_screen(
    input: &mut impl BufRead,
    catalog: &ZoneCatalog,
    mode: CompletenessMode,
) -> anyhow::Result<Option<InspectionSession>> {
    println!("Inspección de Botiquines");

    let inspector = loop {
        match prompt(input, "Inspector")? {
            None => return Ok(None),
            Some(s) if !s.is_empty() => break s,
            Some(_) => println!("El nombre no puede estar vacío."),
        }
    };

    let date = loop {
        match prompt(input, "Fecha (AAAA-MM-DD)")? {
            None => return Ok(None),
            Some(s) => {
                if crate::domain::models::IsoDate::parse(&s).is_ok() {
                    break s;
                }
                println!("Fecha inválida.");
            }
        }
    };

    let zones = catalog.zones();
    println!("Zonas:");
    for (i, zone) in zones.iter().enumerate() {
        println!("  {}. {}", i + 1, zone);
    }
    let zone = loop {
        match prompt(input, "Zona (número o nombre)")? {
            None => return Ok(None),
            Some(s) if s.is_empty() => println!("La zona no puede estar vacía."),
            Some(s) => {
                if let Ok(n) = s.parse::<usize>() {
                    if n >= 1 && n <= zones.len() {
                        break zones[n - 1].to_string();
                    }
                    println!("Número fuera de rango.");
                    continue;
                }
                break s;
            }
        }
    };

    Ok(Some(InspectionSession::start(&inspector, &date, &zone, mode)?))
}

/// Returns false on EOF teardown.
fn checklist_screen(
    input: &mut impl BufRead,
    catalog: &ZoneCatalog,
    session: &mut InspectionSession,
) -> anyhow::Result<bool> {
    let sections = catalog.sections(&session.meta.zone);
    for section in sections {
        println!();
        println!("== {}", section);
        for question in catalog.questions() {
            println!("{}", question);
            let answer = loop {
                match prompt(input, "Respuesta [SI/NO/N-A]")? {
                    None => return Ok(false),
                    Some(s) => match normalize_answer(&s) {
                        Some(a) => break a,
                        None => println!("Responda SI, NO o N/A."),
                    },
                }
            };
            let Some(comment) = prompt(input, "Comentarios (opcional)")? else {
                return Ok(false);
            };
            session.ledger.update(
                section,
                question,
                ResponsePatch {
                    answer: Some(answer),
                    comment: Some(comment),
                },
            );
        }
    }
    Ok(true)
}

fn finalize_screen(
    input: &mut impl BufRead,
    catalog: &ZoneCatalog,
    session: &InspectionSession,
    endpoint: &str,
) -> anyhow::Result<Outcome> {
    loop {
        println!();
        println!("Generando y enviando reporte...");
        match session.finalize(catalog, &XlsxEncoder, endpoint) {
            Ok(receipt) => {
                println!("¡Éxito! {}", receipt.message);
                println!("Regresando a la página de inicio...");
                let (_cancel, rx) = mpsc::channel::<()>();
                if wait_before_return(RETURN_DELAY, &rx) {
                    return Ok(Outcome::BackToStart);
                }
                return Ok(Outcome::Quit);
            }
            Err(e) => {
                println!("Error: {}", e);
                match prompt(input, "Reintentar (r) / Volver al inicio (v)")? {
                    None => return Ok(Outcome::Quit),
                    Some(s) if s.eq_ignore_ascii_case("r") => continue,
                    Some(_) => return Ok(Outcome::BackToStart),
                }
            }
        }
    }
}

fn normalize_answer(raw: &str) -> Option<String> {
    let normalized = raw.trim().replace(['í', 'Í'], "i").to_ascii_uppercase();
    match normalized.as_str() {
        "SI" | "S" => Some("SI".to_string()),
        "NO" | "N" => Some("NO".to_string()),
        "N/A" | "NA" | "N-A" => Some("N/A".to_string()),
        _ => None,
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::normalize_answer;

    #[test]
    fn answers_normalize_to_the_three_options() {
        assert_eq!(normalize_answer("si").as_deref(), Some("SI"));
        assert_eq!(normalize_answer("Sí").as_deref(), Some("SI"));
        assert_eq!(normalize_answer(" NO ").as_deref(), Some("NO"));
        assert_eq!(normalize_answer("na").as_deref(), Some("N/A"));
        assert_eq!(normalize_answer("n-a").as_deref(), Some("N/A"));
        assert_eq!(normalize_answer("tal vez"), None);
        assert_eq!(normalize_answer(""), None);
    }
}
