//! JSON/text output helpers. `--json` wraps every payload in the `{ok, data}`
//! envelope; text mode renders through a caller-supplied formatter.

use crate::domain::models::JsonOut;
use serde::Serialize;

pub fn emit<T: Serialize>(
    json: bool,
    data: &T,
    text: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", text(data));
    }
    Ok(())
}

pub fn emit_list<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}
