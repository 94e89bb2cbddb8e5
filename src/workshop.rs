//! 対話式の盘点・订货画面
//!
//! 確認ダイアログはここで出し、状態遷移は Session に任せる。

use crate::error::{StocktakeError, Result};
use crate::export;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};
use stocktake_common::export::share_caption;
use stocktake_common::{
    Action, CommitOutcome, Correction, ExportLayout, ItemStatus, JumpOutcome, Mode, NewItem,
    ProductItem, Session,
};

/// 画面のコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkshopCommand {
    /// 数量を入力して次へ
    Input(String),
    Next,
    Previous,
    Skip,
    ToggleUnused,
    Correct,
    JumpPending,
    /// 序号（1始まり）へ移動
    Goto(usize),
    List,
    Finish,
    Leave,
    Help,
}

/// 画面を抜けた理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopExit {
    Finished,
    Left,
}

/// 完了画面を抜けた理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryExit {
    BackToWorkshop,
    Exported(PathBuf),
}

pub fn parse_command(input: &str) -> WorkshopCommand {
    let trimmed = input.trim();

    match trimmed {
        "" | "n" => WorkshopCommand::Next,
        "p" => WorkshopCommand::Previous,
        "s" => WorkshopCommand::Skip,
        "u" => WorkshopCommand::ToggleUnused,
        "e" => WorkshopCommand::Correct,
        "j" => WorkshopCommand::JumpPending,
        "l" => WorkshopCommand::List,
        "f" => WorkshopCommand::Finish,
        "q" => WorkshopCommand::Leave,
        "h" | "?" => WorkshopCommand::Help,
        _ => match trimmed.strip_prefix('g').map(|n| n.trim().parse::<usize>()) {
            Some(Ok(seq)) => WorkshopCommand::Goto(seq),
            _ => WorkshopCommand::Input(trimmed.to_string()),
        },
    }
}

fn help_text(mode: Mode) -> String {
    let skip = if mode.allows_skip() { " [s]跳过(无需订货)" } else { "" };
    format!(
        "操作: [数字]录入并下一个 [Enter/n]下一个 [p]上一个{} [u]不再使用 [e]信息有误 [j]下一个未处理 [g序号]跳转 [l]清单 [f]{} [q]返回主菜单",
        skip,
        mode.finish_label()
    )
}

/// 盘点・订货画面
pub fn run_workshop(session: &mut Session) -> Result<WorkshopExit> {
    println!("{}", help_text(session.mode()));
    println!("---\n");

    loop {
        print_current(session);

        let input = prompt_text("数量", "", true)?;

        match parse_command(&input) {
            WorkshopCommand::Input(text) => {
                session.set_staged(text);
                advance(session);
            }
            WorkshopCommand::Next => advance(session),
            WorkshopCommand::Previous => {
                if !session.previous() {
                    println!("  → 已是第一个货品\n");
                }
            }
            WorkshopCommand::Skip => {
                if !session.mode().allows_skip() {
                    println!("  ⚠ 盘点模式不能跳过\n");
                    continue;
                }
                let name = session.current().name().to_string();
                session.skip()?;
                println!("  → {} 无需订货\n", name);
            }
            WorkshopCommand::ToggleUnused => {
                if let Some(confirmation) = session.confirmation_for(Action::MarkUnused) {
                    if !confirm(&confirmation.message())? {
                        continue;
                    }
                }
                let name = session.current().name().to_string();
                if session.toggle_unused() {
                    println!("  → {} 已标记不再使用\n", name);
                } else {
                    println!("  → {} 已取消不再使用\n", name);
                }
            }
            WorkshopCommand::Correct => prompt_correction(session)?,
            WorkshopCommand::JumpPending => match session.jump_to_first_pending() {
                JumpOutcome::Moved(index) => println!("  → 跳转到第 {} 个\n", index + 1),
                JumpOutcome::AllProcessed => println!("  ✔ 所有货品已处理完毕！\n"),
            },
            WorkshopCommand::Goto(seq) => {
                if seq == 0 || seq > session.len() {
                    println!("  ⚠ 序号应在 1-{} 之间\n", session.len());
                    continue;
                }
                session.jump_to(seq - 1)?;
            }
            WorkshopCommand::List => print_lists(session),
            WorkshopCommand::Finish => {
                if let Some(confirmation) = session.confirmation_for(Action::Finish) {
                    if !confirm(&confirmation.message())? {
                        continue;
                    }
                }
                let report = session.finish();
                if report.commit == CommitOutcome::Rejected {
                    println!("  ⚠ 当前输入不是数字，未保存");
                }
                return Ok(WorkshopExit::Finished);
            }
            WorkshopCommand::Leave => {
                if let Some(confirmation) = session.confirmation_for(Action::Leave) {
                    if !confirm(&confirmation.message())? {
                        continue;
                    }
                }
                return Ok(WorkshopExit::Left);
            }
            WorkshopCommand::Help => println!("{}\n", help_text(session.mode())),
        }
    }
}

fn advance(session: &mut Session) {
    let staged = session.staged().to_string();
    let moved = session.next();

    // next() 後の位置を見て、直前の货品の結果を判定する
    let previous = if moved { session.position() - 1 } else { session.position() };
    let item = &session.items()[previous];
    if !staged.trim().is_empty() && item.status() == ItemStatus::Pending {
        println!("  ⚠ \"{}\" 不是数字，未保存", staged.trim());
    }
    if !moved {
        println!("  → 已是最后一个货品，输入 f {}\n", session.mode().finish_label());
    }
}

fn print_current(session: &Session) {
    let item = session.current();
    let progress = session.progress();

    println!(
        "[{}/{}] {} | 进度: {}",
        session.position() + 1,
        session.len(),
        session.mode().system_label(),
        progress
    );
    println!("  {}{}", item.name(), flags(item));
    if !item.spec().is_empty() {
        println!("  规格: {}", item.spec());
    }

    let current = match item.status() {
        ItemStatus::Skipped => "无需订货".to_string(),
        ItemStatus::Pending | ItemStatus::Completed => match session.staged() {
            "" => "-".to_string(),
            staged => format!("{} {}", staged, item.unit()),
        },
    };
    println!("  当前: {}", current);
}

fn flags(item: &ProductItem) -> String {
    let mut flags = Vec::new();
    if item.is_unused() {
        flags.push("[不再使用]");
    }
    if item.has_error() {
        flags.push("[已修正]");
    }
    if item.is_new() {
        flags.push("[新增]");
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" {}", flags.join(""))
    }
}

fn print_lists(session: &Session) {
    let mode = session.mode();
    let processed = session.processed_indices();
    let pending = session.pending_indices();

    println!("  {} ({})", mode.processed_label(), processed.len());
    for &i in &processed {
        let item = &session.items()[i];
        let quantity = match item.status() {
            ItemStatus::Skipped => "无需订货".to_string(),
            _ => format!("{} {}", item.quantity_text().unwrap_or_default(), item.unit()),
        };
        println!("    {}. {} ({}) {}", i + 1, item.name(), item.spec(), quantity);
    }

    println!("  {} ({})", mode.pending_label(), pending.len());
    for &i in &pending {
        let item = &session.items()[i];
        println!("    {}. {} ({})", i + 1, item.name(), item.spec());
    }
    println!();
}

fn prompt_correction(session: &mut Session) -> Result<()> {
    let item = session.current().clone();
    println!("  修正货品信息");

    let name = prompt_text("名称", item.name(), false)?;
    let spec = prompt_text("规格", item.spec(), true)?;
    let unit = prompt_text("单位", item.unit(), true)?;

    if !confirm("保存修改？")? {
        println!("  → 已取消\n");
        return Ok(());
    }

    session.correct_current(Correction { name, spec, unit });
    println!("  → 已修正\n");
    Ok(())
}

/// 完了画面（返回修改 / 继续增加货品 / 导出）
pub fn run_summary(session: &mut Session, layout: ExportLayout, output_dir: &Path) -> Result<SummaryExit> {
    loop {
        let progress = session.progress();
        let title = match session.mode() {
            Mode::Count => "货品盘点完毕",
            Mode::Order => "订货单已完成",
        };

        println!("\n✅ {}", title);
        println!("  {} - {}", session.store_name(), session.operator().username);
        println!("  共 {} 项，已完成 {} 项", progress.total, progress.completed);
        println!("  您辛苦了！\n");

        let choice = Select::new()
            .with_prompt("请选择")
            .items(&["返回修改", "继续增加货品", "结束并导出Excel"])
            .default(2)
            .interact()
            .map_err(|e| StocktakeError::CliExecution(e.to_string()))?;

        match choice {
            0 => return Ok(SummaryExit::BackToWorkshop),
            1 => prompt_new_item(session)?,
            _ => {
                let path = export::export_session(session, layout, output_dir)?;
                println!("  {}", share_caption(session));
                return Ok(SummaryExit::Exported(path));
            }
        }
    }
}

fn prompt_new_item(session: &mut Session) -> Result<()> {
    println!("  新增货品");
    let input = NewItem {
        name: prompt_text("货品名称", "", true)?,
        spec: prompt_text("规格 (如: 500g/包)", "", true)?,
        unit: prompt_text("单位", "", true)?,
        quantity: prompt_text("数量", "", true)?,
    };

    match session.append_item(input) {
        Ok(item) => println!("  ✔ 货品已添加！({})", item.name()),
        Err(stocktake_common::Error::MissingName) => println!("  ⚠ 请输入货品名称"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub(crate) fn prompt_text(prompt: &str, initial: &str, allow_empty: bool) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty);
    if !initial.is_empty() {
        input = input.with_initial_text(initial);
    }

    input
        .interact_text()
        .map_err(|e| StocktakeError::CliExecution(e.to_string()))
}

pub(crate) fn confirm(message: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| StocktakeError::CliExecution(e.to_string()))
}
