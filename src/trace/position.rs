//! 位置类型
//!
//! 定义二维位置以及位置日志中的一条采样。

use super::id::NodeId;
use super::time::SimTime;

/// 平面位置（米）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 与另一位置的欧氏距离平方
    pub fn dist_sq(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// 到原点的欧氏距离平方
    pub fn norm_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// 线性插值：`frac = 0` 返回 `self`，`frac = 1` 返回 `other`。
    pub fn lerp(&self, other: &Position, frac: f64) -> Position {
        Position {
            x: self.x + (other.x - self.x) * frac,
            y: self.y + (other.y - self.y) * frac,
        }
    }
}

/// 位置日志中的一条记录：某节点在某时刻的位置。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub at: SimTime,
    pub node: NodeId,
    pub pos: Position,
}
