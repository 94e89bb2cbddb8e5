use clap::Parser;
use stocktake_rust::{app, cli, config, error, logging, source};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Run { user, mode, users, products, output, layout } => {
            println!("📋 stocktake - 门店盘点/订货\n");

            let options = app::RunOptions {
                username: user,
                mode,
                users_path: users.or_else(|| config.users_path()),
                products_path: products.or_else(|| config.products_path()),
                output_dir: output.unwrap_or_else(|| config.output_dir()),
                layout: layout.unwrap_or(config.export_layout),
            };
            app::run(options).await?;
        }

        Commands::Items { store, products } => {
            let path = products.or_else(|| config.products_path());
            let loaded = source::fetch_products(path.as_deref(), &store).await;

            match &loaded.origin {
                source::ItemOrigin::File(path) => println!("{} ({})", store, path.display()),
                source::ItemOrigin::Fallback(reason) => {
                    println!("{} (内置清单: {})", store, reason)
                }
            }
            for (i, item) in loaded.items.iter().enumerate() {
                println!("  {}. {} | {} | {}", i + 1, item.name, item.spec, item.unit);
            }
        }

        Commands::Config { show, set_users, set_products, set_output_dir, set_layout } => {
            let mut config = config;
            let changed = set_users.is_some()
                || set_products.is_some()
                || set_output_dir.is_some()
                || set_layout.is_some();

            if let Some(path) = set_users {
                config.users_path = Some(path);
            }
            if let Some(path) = set_products {
                config.products_path = Some(path);
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = dir;
            }
            if let Some(layout) = set_layout {
                config.export_layout = layout;
            }

            if changed {
                config.save()?;
                println!("✔ 设置已保存: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let display = |p: Option<std::path::PathBuf>| {
                    p.map(|p| p.display().to_string()).unwrap_or_else(|| "未设置（使用内置数据）".into())
                };
                println!("设置:");
                println!("  操作员文件: {}", display(config.users_path()));
                println!("  货品清单: {}", display(config.products_path()));
                println!("  导出目录: {}", config.output_dir().display());
                println!("  导出格式: {}", config.export_layout);
            }
        }
    }

    Ok(())
}
