//! Query operation listing

use genegraph_core::QueryKind;
use serde::Serialize;

use crate::output::{format_output, Tabular};
use crate::AppContext;

#[derive(Serialize)]
struct Operation {
    name: &'static str,
    takes_depth: bool,
    description: &'static str,
}

#[derive(Serialize)]
#[serde(transparent)]
struct Operations(Vec<Operation>);

impl Tabular for Operations {
    fn to_table(&self) -> String {
        self.0
            .iter()
            .map(|op| {
                let depth = if op.takes_depth { " [--depth N]" } else { "" };
                format!("{}{}\n  {}", op.name.replace('_', "-"), depth, op.description)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let operations = Operations(
        QueryKind::ALL
            .iter()
            .map(|kind| Operation {
                name: kind.name(),
                takes_depth: kind.is_bounded(),
                description: kind.description(),
            })
            .collect(),
    );
    println!("{}", format_output(&operations, ctx.format)?);
    Ok(())
}
