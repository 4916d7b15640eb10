//! 舵机脉宽标定
//!
//! 三点标定：最小 / 中位 / 最大脉宽分别对应最小角、零角与最大角。
//! 标定一经构造即不可变；角度→脉宽映射对越界角度返回错误而不是
//! 输出未定义的 PWM 值。

use std::time::Duration;

use pup_kinematics::Deg;

use crate::{Result, ServoError};

/// 角度→脉宽映射的标定跨度（min 到 max 覆盖的角度范围）
const CALIBRATION_SPAN_DEG: f64 = 180.0;

/// 脉宽比较容差（秒），吸收映射计算的浮点误差
const PULSE_EPS: f64 = 1e-12;

/// 舵机脉宽标定（构造后不可变）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCalibration {
    pulse_min: Duration,
    pulse_mid: Duration,
    pulse_max: Duration,
    frequency_hz: u32,
}

impl ServoCalibration {
    /// 创建标定
    ///
    /// 校验 `min < mid < max`、频率为正、最大脉宽不超过 PWM 周期；
    /// 任何一项不满足都在构造时拒绝。
    pub fn new(
        pulse_min: Duration,
        pulse_mid: Duration,
        pulse_max: Duration,
        frequency_hz: u32,
    ) -> Result<Self> {
        if frequency_hz == 0 {
            return Err(ServoError::ZeroFrequency);
        }
        if !(pulse_min < pulse_mid && pulse_mid < pulse_max) {
            return Err(ServoError::InvalidPulseOrdering {
                min: pulse_min,
                mid: pulse_mid,
                max: pulse_max,
            });
        }

        let period = Duration::from_secs_f64(1.0 / f64::from(frequency_hz));
        if pulse_max >= period {
            return Err(ServoError::PulseExceedsPeriod {
                max: pulse_max,
                frequency_hz,
            });
        }

        Ok(Self {
            pulse_min,
            pulse_mid,
            pulse_max,
            frequency_hz,
        })
    }

    /// 标定的 PWM 频率（Hz）
    #[inline]
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// 每度对应的脉宽增量（秒）
    #[inline]
    fn secs_per_degree(&self) -> f64 {
        (self.pulse_max - self.pulse_min).as_secs_f64() / CALIBRATION_SPAN_DEG
    }

    /// 标定允许的最小角度
    pub fn min_angle(&self) -> Deg {
        let delta = self.pulse_mid.as_secs_f64() - self.pulse_min.as_secs_f64();
        Deg(-delta / self.secs_per_degree())
    }

    /// 标定允许的最大角度
    pub fn max_angle(&self) -> Deg {
        let delta = self.pulse_max.as_secs_f64() - self.pulse_mid.as_secs_f64();
        Deg(delta / self.secs_per_degree())
    }

    /// 角度→脉宽映射
    ///
    /// `pulse = mid + angle × 每度脉宽`。映射结果落在
    /// `[pulse_min, pulse_max]` 之外时返回
    /// [`ServoError::AngleOutOfRange`]，不输出任何脉冲。
    pub fn pulse_for(&self, angle: Deg) -> Result<Duration> {
        let pulse_secs = self.pulse_mid.as_secs_f64() + angle.value() * self.secs_per_degree();

        if !pulse_secs.is_finite()
            || pulse_secs < self.pulse_min.as_secs_f64() - PULSE_EPS
            || pulse_secs > self.pulse_max.as_secs_f64() + PULSE_EPS
        {
            return Err(ServoError::AngleOutOfRange {
                angle,
                min: self.min_angle(),
                max: self.max_angle(),
            });
        }

        Ok(Duration::from_secs_f64(
            pulse_secs.clamp(
                self.pulse_min.as_secs_f64(),
                self.pulse_max.as_secs_f64(),
            ),
        ))
    }
}

impl Default for ServoCalibration {
    /// 参考硬件的实测标定：0.6 / 1.6 / 2.6 ms @ 50 Hz，
    /// 对应 -90° / 0° / +90°。
    fn default() -> Self {
        Self {
            pulse_min: Duration::from_micros(600),
            pulse_mid: Duration::from_micros(1600),
            pulse_max: Duration::from_micros(2600),
            frequency_hz: 50,
        }
    }
}
