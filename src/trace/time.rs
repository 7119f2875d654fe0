//! 仿真时间类型
//!
//! 日志中的时间戳是浮点秒；加载时统一转换为整数纳秒，
//! 之后所有的连接与分组都基于 `SimTime` 做精确相等比较。

/// 仿真时间（纳秒）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    /// 从浮点秒转换，四舍五入到纳秒。
    ///
    /// 负数、NaN、无穷大以及超出 `u64` 纳秒范围的值返回 `None`。
    pub fn from_secs_f64(secs: f64) -> Option<SimTime> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let ns = (secs * 1e9).round();
        if ns >= u64::MAX as f64 {
            return None;
        }
        Some(SimTime(ns as u64))
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1e9
    }
}
