//! 单节点轨迹
//!
//! 按时间排序的位置采样序列，以及在其上的线性插值。

use crate::trace::{Position, SimTime};

/// 一个节点的位置轨迹（采样按时间升序，时刻唯一）。
#[derive(Debug, Clone)]
pub struct Trajectory {
    samples: Vec<(SimTime, Position)>,
}

impl Trajectory {
    /// 由采样构建轨迹。
    ///
    /// 采样先按时间稳定排序；同一时刻的多条采样只保留最后记录的一条。
    pub fn new(mut samples: Vec<(SimTime, Position)>) -> Self {
        samples.sort_by_key(|(at, _)| *at);
        let mut uniq: Vec<(SimTime, Position)> = Vec::with_capacity(samples.len());
        for (at, pos) in samples {
            match uniq.last_mut() {
                Some(last) if last.0 == at => last.1 = pos,
                _ => uniq.push((at, pos)),
            }
        }
        Self { samples: uniq }
    }

    pub fn samples(&self) -> &[(SimTime, Position)] {
        &self.samples
    }

    /// 可插值区间 `[首个采样时刻, 最后采样时刻]`；少于两个采样时为 `None`。
    pub fn span(&self) -> Option<(SimTime, SimTime)> {
        if self.samples.len() < 2 {
            return None;
        }
        let first = self.samples.first()?.0;
        let last = self.samples.last()?.0;
        Some((first, last))
    }

    /// 在单个时刻求位置；区间外返回 `None`。
    pub fn position_at(&self, t: SimTime) -> Option<Position> {
        self.resample(&[t]).pop().map(|(_, pos)| pos)
    }

    /// 在一组升序、去重的查询时刻上求位置。
    ///
    /// 查询时刻与采样时间线归并扫描：落在采样时刻上的直接取采样值，
    /// 落在两采样之间的按时间线性插值，区间外的查询被跳过。
    pub fn resample(&self, queries: &[SimTime]) -> Vec<(SimTime, Position)> {
        let mut out = Vec::new();
        let Some((first, last)) = self.span() else {
            return out;
        };

        let mut seg = 0;
        for &t in queries {
            if t < first {
                continue;
            }
            if t > last {
                break;
            }
            while seg + 1 < self.samples.len() && self.samples[seg + 1].0 <= t {
                seg += 1;
            }
            let (t0, p0) = self.samples[seg];
            if t0 == t || seg + 1 == self.samples.len() {
                out.push((t, p0));
                continue;
            }
            let (t1, p1) = self.samples[seg + 1];
            let frac = (t.0 - t0.0) as f64 / (t1.0 - t0.0) as f64;
            out.push((t, p0.lerp(&p1, frac)));
        }
        out
    }
}
