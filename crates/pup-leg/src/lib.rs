//! # Pup 腿部控制层
//!
//! 把一条 2 自由度腿（髋舵机 + 膝舵机 + 几何参数 + 左右侧）组合
//! 成面向目标点的控制接口：逆解、按侧选解、镜像变换、下发命令。
//!
//! # 左右镜像
//!
//! 左右腿的膝舵机是镜像安装的。为了让两侧在视觉上朝同一方向
//! 弯折，右腿取解集下标 0（膝关节角为正），左腿取下标 1（镜像
//! 解）；膝舵机命令在取反后再叠加每侧固定的安装偏置（右 90°，
//! 左 0°）。
//!
//! # 可达性语义
//!
//! 目标不可达通过 `Ok(false)` 表达，是正常业务结果；只有舵机
//! 标定越界或硬件故障才走 `Err` 路径。

pub mod leg;
pub mod side;

pub use leg::Leg;
pub use side::Side;

use thiserror::Error;

/// 腿部控制错误类型
///
/// 目标不可达不在此列（以 `Ok(false)` 表达）。
#[derive(Debug, Error)]
pub enum LegError {
    /// 舵机层错误（标定越界、汇端故障）
    #[error(transparent)]
    Servo(#[from] pup_servo::ServoError),
}

impl LegError {
    /// 是否为角度越界（目标点在几何上可达但超出舵机行程）
    pub fn is_out_of_range(&self) -> bool {
        match self {
            Self::Servo(err) => err.is_out_of_range(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, LegError>;
