//! Status Queries

/// 查询语言模型与凭证状态
#[derive(Debug, Clone)]
pub struct GetLlmStatus;

/// 单个凭证的存在性（只记录长度，不保存值）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPresence {
    pub name: &'static str,
    pub length: usize,
}

impl CredentialPresence {
    pub fn new(name: &'static str, value: Option<&str>) -> Self {
        Self {
            name,
            length: value.map(str::len).unwrap_or(0),
        }
    }

    pub fn present(&self) -> bool {
        self.length > 0
    }
}
