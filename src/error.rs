use thiserror::Error;

#[derive(Error, Debug)]
pub enum StocktakeError {
    #[error("设置错误: {0}")]
    Config(String),

    #[error("用户名或密码错误")]
    Authentication,

    #[error("数据源不可用: {0}")]
    SourceUnavailable(String),

    #[error("货品清单中没有门店: {0}")]
    SheetNotFound(String),

    #[error("Excel读取错误: {0}")]
    ExcelRead(#[from] calamine::Error),

    #[error("Excel生成错误: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("交互输入错误: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] stocktake_common::Error),
}

pub type Result<T> = std::result::Result<T, StocktakeError>;
