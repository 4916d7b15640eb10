//! # Pup 步态与姿态层
//!
//! 把四条腿组合成整机：站立 / 坐下 / 伸展等姿态，以及可取消的
//! 行走与舞蹈循环。本层只做序列化调度（姿态目标 + 阻塞延时），
//! 所有几何推理都在腿部接口之下完成。
//!
//! # 并发模型
//!
//! 行走循环可以放在一个工作线程里跑，控制线程持有
//! [`CancelHandle`]。取消信号走 channel，循环在每个步态步的
//! 边界轮询一次，保证在一个完整步周期内被观察到，并且退出前
//! 把四条腿收回站立姿态，不会把舵机留在运动中途的姿态上。

pub mod cancel;
pub mod config;
pub mod quadruped;

pub use cancel::{CancelHandle, CancelToken, cancel_pair};
pub use config::{ConfigError, GaitConfig, LegConfig, LegsConfig, PulseConfig, RobotConfig};
pub use quadruped::{LegArray, LegId, Quadruped};

use thiserror::Error;

/// 步态层错误类型
#[derive(Debug, Error)]
pub enum GaitError {
    /// 腿部命令失败（舵机越界、硬件故障）
    #[error(transparent)]
    Leg(#[from] pup_leg::LegError),

    /// 姿态脚本中的目标点不可达
    ///
    /// 姿态目标来自配置且应当在可达范围内，这里视为配置缺陷
    /// 而不是正常业务结果。
    #[error("Posture target ({x:.2}, {y:.2}) unreachable for {leg} leg")]
    UnreachablePosture {
        /// 哪条腿
        leg: quadruped::LegId,
        /// 目标 x
        x: f64,
        /// 目标 y
        y: f64,
    },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, GaitError>;
