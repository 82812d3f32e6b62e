//! Mail-in-a-Box API 类型定义

use serde::Deserialize;

/// `GET /dns/custom/{qname}/{rtype}` 返回的单条记录
#[derive(Debug, Deserialize)]
pub struct MiabRecord {
    pub qname: String,
    pub rtype: String,
    pub value: String,
}
