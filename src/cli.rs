use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stocktake_common::{ExportLayout, Mode};

#[derive(Parser)]
#[command(name = "stocktake")]
#[command(about = "门店盘点・订货作业工具", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 登录并开始盘点/订货
    Run {
        /// 用户名（省略时交互输入）
        #[arg(short, long)]
        user: Option<String>,

        /// 作业模式 (count/order)，省略时交互选择
        #[arg(short, long)]
        mode: Option<Mode>,

        /// 操作员文件 users.json
        #[arg(long)]
        users: Option<PathBuf>,

        /// 货品清单 (xlsx/json)
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// 导出目录
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 导出格式 (flat/header)
        #[arg(long)]
        layout: Option<ExportLayout>,
    },

    /// 显示门店的货品清单
    Items {
        /// 门店名称（= 工作表名）
        #[arg(short, long, required = true)]
        store: String,

        /// 货品清单 (xlsx/json)
        #[arg(short, long)]
        products: Option<PathBuf>,
    },

    /// 显示/编辑设置
    Config {
        /// 显示设置
        #[arg(long)]
        show: bool,

        /// 设置操作员文件
        #[arg(long)]
        set_users: Option<PathBuf>,

        /// 设置货品清单
        #[arg(long)]
        set_products: Option<PathBuf>,

        /// 设置导出目录
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 设置导出格式 (flat/header)
        #[arg(long)]
        set_layout: Option<ExportLayout>,
    },
}
