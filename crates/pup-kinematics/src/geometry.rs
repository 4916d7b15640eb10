//! 腿部几何参数
//!
//! 描述一条 2 自由度腿的两段连杆长度，并在构造时完成校验。
//! 几何参数一经构造即不可变，可达范围由两段长度唯一决定。

use thiserror::Error;

/// 运动学错误类型
///
/// 仅覆盖真正异常的情况（非法几何参数）。目标点不可达不是错误，
/// 由求解器返回空解集表达。
#[derive(Debug, Error, PartialEq)]
pub enum KinematicsError {
    /// 连杆长度非正
    #[error("Invalid segment length for '{segment}': {value} (must be positive and finite)")]
    InvalidSegmentLength {
        /// 连杆名称
        segment: &'static str,
        /// 实际值
        value: f64,
    },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, KinematicsError>;

/// 腿部几何参数（构造后不可变）
///
/// `upper` 为髋关节到膝关节的连杆长度，`lower` 为膝关节到足端的
/// 连杆长度。单位任意，只要与目标点坐标一致。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegGeometry {
    upper: f64,
    lower: f64,
}

impl LegGeometry {
    /// 创建腿部几何参数
    ///
    /// 非正或非有限的连杆长度在构造时立即拒绝。
    pub fn new(upper: f64, lower: f64) -> Result<Self> {
        if !(upper.is_finite() && upper > 0.0) {
            return Err(KinematicsError::InvalidSegmentLength {
                segment: "upper",
                value: upper,
            });
        }
        if !(lower.is_finite() && lower > 0.0) {
            return Err(KinematicsError::InvalidSegmentLength {
                segment: "lower",
                value: lower,
            });
        }
        Ok(Self { upper, lower })
    }

    /// 第一段连杆长度（髋到膝）
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// 第二段连杆长度（膝到足端）
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// 最大可达距离（两段完全伸直）
    #[inline]
    pub fn max_reach(&self) -> f64 {
        self.upper + self.lower
    }

    /// 最小可达距离（两段完全折叠）
    #[inline]
    pub fn min_reach(&self) -> f64 {
        (self.upper - self.lower).abs()
    }
}
