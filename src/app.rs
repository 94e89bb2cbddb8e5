//! ログイン → モード選択 → 作業 → 完了・導出 の流れ

use crate::directory::{self, UserEntry};
use crate::error::{StocktakeError, Result};
use crate::source;
use crate::workshop::{self, prompt_text, SummaryExit, WorkshopExit};
use dialoguer::{Password, Select};
use std::path::PathBuf;
use stocktake_common::{ExportLayout, Mode, Operator, Session};

/// 実行時の設定（CLI引数と設定ファイルをマージ済み）
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub username: Option<String>,
    pub mode: Option<Mode>,
    pub users_path: Option<PathBuf>,
    pub products_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub layout: ExportLayout,
}

/// ログイン中の操作员と進行中のセッション
#[derive(Debug, Default)]
pub struct AppState {
    pub operator: Option<Operator>,
    pub session: Option<Session>,
}

impl AppState {
    /// モード選択に戻る（セッションを破棄）
    pub fn reset_session(&mut self) {
        self.session = None;
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.operator = None;
    }
}

enum MenuChoice {
    Start(Mode),
    Logout,
}

pub async fn run(options: RunOptions) -> Result<()> {
    let users = directory::fetch_users(options.users_path.as_deref()).await;
    let mut state = AppState::default();
    let mut preset_mode = options.mode;

    let operator = login(&users, options.username.as_deref())?;
    println!("\n{}\n欢迎您，{}\n", operator.store_name, operator.username);
    state.operator = Some(operator.clone());

    loop {
        let mode = match preset_mode.take() {
            Some(mode) => mode,
            None => match select_mode()? {
                MenuChoice::Start(mode) => mode,
                MenuChoice::Logout => {
                    if workshop::confirm("确定要退出登录吗？")? {
                        state.logout();
                        println!("已退出登录");
                        return Ok(());
                    }
                    continue;
                }
            },
        };

        println!("- 正在加载货品清单...");
        let loaded = source::fetch_products(options.products_path.as_deref(), &operator.store_name).await;
        match &loaded.origin {
            source::ItemOrigin::File(path) => println!("✔ {} 个货品 ({})\n", loaded.items.len(), path.display()),
            source::ItemOrigin::Fallback(reason) => {
                println!("⚠ 使用内置货品清单: {}", reason);
                println!("✔ {} 个货品\n", loaded.items.len());
            }
        }

        let session = state.session.insert(Session::new(operator.clone(), mode, loaded.items)?);
        run_session(session, &options)?;
        state.reset_session();
    }
}

fn run_session(session: &mut Session, options: &RunOptions) -> Result<()> {
    loop {
        match workshop::run_workshop(session)? {
            WorkshopExit::Left => return Ok(()),
            WorkshopExit::Finished => {}
        }

        match workshop::run_summary(session, options.layout, &options.output_dir)? {
            SummaryExit::BackToWorkshop => continue,
            SummaryExit::Exported(_) => return Ok(()),
        }
    }
}

fn login(users: &[UserEntry], preset_username: Option<&str>) -> Result<Operator> {
    let mut preset_username = preset_username.map(str::to_string);

    loop {
        let username = match preset_username.take() {
            Some(name) => {
                println!("用户名: {}", name);
                name
            }
            None => prompt_text("用户名", "", false)?,
        };

        let password = Password::new()
            .with_prompt("密码")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| StocktakeError::CliExecution(e.to_string()))?;

        match directory::authenticate(users, username.trim(), &password) {
            Ok(operator) => return Ok(operator),
            Err(e) => println!("⚠ {}", e),
        }
    }
}

fn select_mode() -> Result<MenuChoice> {
    let choice = Select::new()
        .with_prompt("请选择系统")
        .items(&[Mode::Count.system_label(), Mode::Order.system_label(), "退出登录"])
        .default(0)
        .interact()
        .map_err(|e| StocktakeError::CliExecution(e.to_string()))?;

    Ok(match choice {
        0 => MenuChoice::Start(Mode::Count),
        1 => MenuChoice::Start(Mode::Order),
        _ => MenuChoice::Logout,
    })
}
