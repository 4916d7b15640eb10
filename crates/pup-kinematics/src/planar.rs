//! 平面 2 连杆逆运动学求解
//!
//! 由余弦定理推导的闭式解。对可达环带内部的目标点给出两个解
//! （肘上 / 肘下两种弯折方向），环带边界上恰好一个解，环带外
//! 返回空解集。
//!
//! # 解序约定
//!
//! 返回的解顺序是对外契约：下标 0 的膝关节角为正（`+acos`），
//! 下标 1 为其镜像（`-acos`）。腿部控制层依赖该顺序按左右侧
//! 选择弯折方向。
//!
//! # 数值边界
//!
//! 目标点恰好落在伸直边界或折叠边界上时 `|cos| == 1`，只存在
//! 一个物理位形；浮点误差导致的 ε 级越界按边界处理，不应被
//! 误判为不可达。

use nalgebra::Point2;
use smallvec::SmallVec;

use crate::geometry::LegGeometry;
use crate::units::Rad;

/// 浮点边界容差：`|cos|` 超出 1 不到该值时按边界目标处理
const BOUNDARY_EPS: f64 = 1e-9;

/// 一组关节角解（肩关节角 + 膝关节角，弧度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    /// 肩关节（第一关节）角度
    pub shoulder: Rad,
    /// 膝关节（第二关节）角度
    pub knee: Rad,
}

/// 逆解结果：0 个（不可达）、1 个（边界）或 2 个（环带内部）解
///
/// 解至多两个，SmallVec 使常规路径零堆分配。
pub type IkSolutions = SmallVec<[IkSolution; 2]>;

impl LegGeometry {
    /// 求解足端目标点的关节角
    ///
    /// 目标点位于腿部局部矢状面内，坐标单位与连杆长度一致。
    /// 不可达（过远或过近）返回空解集，调用方据此决策，
    /// 这不是错误路径。
    pub fn solve(&self, target: Point2<f64>) -> IkSolutions {
        let (x, y) = (target.x, target.y);
        let (l1, l2) = (self.upper(), self.lower());

        // 余弦定理给出膝关节角的余弦
        let mut cos_knee = (x * x + y * y - l1 * l1 - l2 * l2) / (2.0 * l1 * l2);

        let mut solutions = IkSolutions::new();

        // 余弦值域为 [-1, 1]，显著越界即目标在可达环带之外
        if cos_knee.abs() > 1.0 + BOUNDARY_EPS {
            return solutions;
        }
        cos_knee = cos_knee.clamp(-1.0, 1.0);

        // acos 落在 [0, π]
        let knee = cos_knee.acos();

        // 完全伸直（0）或完全折叠（π）时正负号重合，只有一个位形
        let degenerate = knee == 0.0 || knee == std::f64::consts::PI;

        for a in [knee, -knee] {
            let k1 = l1 + l2 * a.cos();
            let k2 = l2 * a.sin();
            let shoulder = y.atan2(x) - k2.atan2(k1);

            solutions.push(IkSolution {
                shoulder: Rad(shoulder),
                knee: Rad(a),
            });

            if degenerate {
                break;
            }
        }

        solutions
    }

    /// 正运动学：由关节角计算足端位置
    ///
    /// 用于验证逆解（往返性质）和诊断输出。
    pub fn forward(&self, solution: IkSolution) -> Point2<f64> {
        let s = solution.shoulder.value();
        let k = solution.knee.value();

        Point2::new(
            self.upper() * s.cos() + self.lower() * (s + k).cos(),
            self.upper() * s.sin() + self.lower() * (s + k).sin(),
        )
    }
}
