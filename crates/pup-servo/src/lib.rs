//! # Pup 舵机驱动层
//!
//! 把 [`pup_hal::PwmOutput`] 汇端包装成以角度为接口的执行器。
//!
//! # 架构设计
//!
//! - **标定层** (`calibration`): 脉宽标定与角度→脉宽映射，越界显式报错
//! - **规划层** (`trajectory`): 纯函数式线性插值步进规划，可独立测试
//! - **执行层** (`servo`): 立即移动与定时移动，维护当前命令角不变量
//!
//! # 不变量
//!
//! `Servo::current_angle` 永远等于最近一次成功命令的角度；任何
//! 被拒绝或失败的命令都不改变它。

pub mod calibration;
pub mod servo;
pub mod trajectory;

pub use calibration::ServoCalibration;
pub use servo::{STEP_INTERVAL, Servo};
pub use trajectory::LinearPlan;

use pup_kinematics::Deg;
use thiserror::Error;

/// 舵机驱动错误类型
#[derive(Debug, Error)]
pub enum ServoError {
    /// 标定脉宽顺序非法
    #[error("Invalid calibration: pulse widths must satisfy min < mid < max (got {min:?}, {mid:?}, {max:?})")]
    InvalidPulseOrdering {
        /// 最小脉宽
        min: std::time::Duration,
        /// 中位脉宽
        mid: std::time::Duration,
        /// 最大脉宽
        max: std::time::Duration,
    },

    /// 脉宽超出 PWM 周期
    #[error("Invalid calibration: max pulse {max:?} does not fit the {frequency_hz} Hz PWM period")]
    PulseExceedsPeriod {
        /// 最大脉宽
        max: std::time::Duration,
        /// PWM 频率
        frequency_hz: u32,
    },

    /// PWM 频率非法
    #[error("Invalid calibration: PWM frequency must be positive")]
    ZeroFrequency,

    /// 汇端频率与标定不一致
    #[error("PWM frequency mismatch: calibration expects {expected} Hz, sink provides {actual} Hz")]
    FrequencyMismatch {
        /// 标定频率
        expected: u32,
        /// 汇端实际频率
        actual: u32,
    },

    /// 角度映射后的脉宽超出标定范围，命令被整体拒绝
    #[error("Angle {angle} out of calibrated range [{min}, {max}]")]
    AngleOutOfRange {
        /// 请求角度
        angle: Deg,
        /// 标定最小角
        min: Deg,
        /// 标定最大角
        max: Deg,
    },

    /// 硬件汇端错误
    #[error(transparent)]
    Hal(#[from] pup_hal::HalError),
}

impl ServoError {
    /// 是否为标定/配置错误（构造期可发现）
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPulseOrdering { .. }
                | Self::PulseExceedsPeriod { .. }
                | Self::ZeroFrequency
                | Self::FrequencyMismatch { .. }
        )
    }

    /// 是否为角度越界
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::AngleOutOfRange { .. })
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ServoError>;
