//! 线性步进规划
//!
//! 定时移动的插值策略：按固定 tick 把角度差均分成若干步，最后
//! 一步精确贴合目标角以消除浮点累积漂移。规划与执行分离，规划
//! 本身是纯计算，不涉及任何延时或硬件调用。

use std::time::Duration;

use pup_kinematics::Deg;

/// 线性插值步进计划
///
/// 迭代产出每一次应命令的角度：`steps` 个等距中间角，随后一个
/// 精确等于目标角的收尾步。总步数恒为 `steps + 1`。
#[derive(Debug, Clone)]
pub struct LinearPlan {
    from: Deg,
    target: Deg,
    step: Deg,
    steps: u32,
    index: u32,
}

impl LinearPlan {
    /// 创建步进计划
    ///
    /// `steps = duration / tick`（整数截断）。时长不足一个 tick
    /// 时退化为单次立即贴合目标。
    pub fn new(from: Deg, target: Deg, duration: Duration, tick: Duration) -> Self {
        let steps = if tick.is_zero() {
            0
        } else {
            (duration.as_millis() / tick.as_millis()) as u32
        };

        let step = if steps == 0 {
            Deg::ZERO
        } else {
            (target - from) / f64::from(steps)
        };

        Self {
            from,
            target,
            step,
            steps,
            index: 0,
        }
    }

    /// 中间步数（不含收尾贴合步）
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// 每步的角度增量
    #[inline]
    pub fn step_size(&self) -> Deg {
        self.step
    }
}

impl Iterator for LinearPlan {
    type Item = Deg;

    fn next(&mut self) -> Option<Deg> {
        if self.index > self.steps {
            return None;
        }

        let angle = if self.index == self.steps {
            // 收尾步精确贴合目标，消除舍入漂移
            self.target
        } else {
            self.from + self.step * f64::from(self.index + 1)
        };

        self.index += 1;
        Some(angle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1 - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinearPlan {}
