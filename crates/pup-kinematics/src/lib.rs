//! Pup 四足机器人腿部运动学
//!
//! 纯几何计算层：不依赖任何硬件类型，只负责把腿部局部平面内的
//! 足端目标点转换为关节角度。
//!
//! # 架构设计
//!
//! - **单位层** (`units`): `Rad` / `Deg` NewType，编译期防止弧度与角度混用
//! - **几何层** (`geometry`): 腿段长度与可达环带，构造时校验
//! - **求解层** (`planar`): 余弦定理平面 2 连杆逆解，有序双解
//!
//! # 快速开始
//!
//! ```rust
//! use pup_kinematics::{LegGeometry, Point2};
//!
//! let geometry = LegGeometry::new(4.0, 8.0).unwrap();
//! let solutions = geometry.solve(Point2::new(11.0, 0.0));
//!
//! // 环带内部的目标点恰有两个解（肘上 / 肘下）
//! assert_eq!(solutions.len(), 2);
//!
//! // 正解可以验证逆解结果
//! let foot = geometry.forward(solutions[0]);
//! assert!((foot.x - 11.0).abs() < 1e-9);
//! ```

pub mod geometry;
pub mod planar;
pub mod units;

pub use geometry::{KinematicsError, LegGeometry};
pub use planar::{IkSolution, IkSolutions};
pub use units::{Deg, Rad};

// 平面目标点直接复用 nalgebra 的二维点类型
pub use nalgebra::Point2;
