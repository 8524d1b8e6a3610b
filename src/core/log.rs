use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const OP_MAX: usize = 60;

static ANSI: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

fn strip_ansi(s: &str) -> String {
    match ANSI.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "reconcile" => Colour::Yellow,
        "submit" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = rows
            .into_iter()
            .map(|(id, raw_date, op, target, message)| {
                let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(raw_date);
                (id, date, op, target, message)
            })
            .collect();

        let id_w = rows
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows.iter().map(|(_, d, ..)| d.len()).max().unwrap_or(10);

        let mut lines = Vec::with_capacity(rows.len());
        for (id, date, op, target, message) in &rows {
            let colored_op = color_for_operation(op).paint(op.as_str()).to_string();
            let op_target = if target.is_empty() {
                colored_op
            } else {
                let room = OP_MAX.saturating_sub(op.chars().count() + 3);
                format!("{colored_op} ({})", truncate(target, room))
            };
            lines.push((id, date, op_target, message));
        }

        let op_w = lines
            .iter()
            .map(|(_, _, ot, _)| strip_ansi(ot).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_MAX);

        println!("📜 Internal log:\n");

        for (id, date, op_target, message) in lines {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                op_target,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
