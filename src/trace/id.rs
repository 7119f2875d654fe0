//! 标识符类型
//!
//! 定义节点与数据包序列号的标识符。

use std::fmt;

/// 节点标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// 数据包序列号（每个发送者的每次发送唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqNo(pub u64);

impl SeqNo {
    /// 由 (节点, 节点内序号) 组合出的全局序列号：高 32 位为节点，低 32 位为序号。
    pub fn composite(node: u32, seq: u32) -> SeqNo {
        SeqNo((u64::from(node) << 32) | u64::from(seq))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for SeqNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
