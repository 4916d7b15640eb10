//! 腿的左右侧
//!
//! 侧别携带两个语义映射：双解时选用的解集下标，以及膝舵机的
//! 安装偏置。两者都显式写在枚举上，不依赖魔法数字。

use std::fmt;

use pup_kinematics::Deg;

/// 腿所在的身体侧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// 左侧
    Left,
    /// 右侧
    Right,
}

impl Side {
    /// 双解时选用的解集下标
    ///
    /// 右腿取下标 0（正膝角），左腿取下标 1（镜像解），保证两侧
    /// 朝同一视觉方向弯折。
    #[inline]
    pub const fn solution_index(self) -> usize {
        match self {
            Side::Right => 0,
            Side::Left => 1,
        }
    }

    /// 膝舵机的安装偏置
    ///
    /// 补偿左右膝舵机镜像安装的舵盘零位差。
    #[inline]
    pub const fn knee_offset(self) -> Deg {
        match self {
            Side::Right => Deg(90.0),
            Side::Left => Deg(0.0),
        }
    }

    /// 对侧
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// 侧名
    pub const fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
