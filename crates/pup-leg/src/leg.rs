//! 腿部执行器
//!
//! 独占持有两个舵机与几何参数。每次目标命令都完整走
//! 逆解 → 按侧选解 → 单位换算 → 镜像变换 → 下发 的流水线。

use std::time::Duration;

use pup_hal::PwmOutput;
use pup_kinematics::{Deg, IkSolution, LegGeometry, Point2};
use pup_servo::{LinearPlan, STEP_INTERVAL, Servo};
use tracing::{debug, trace};

use crate::side::Side;
use crate::Result;

/// 2 自由度腿
///
/// `shoulder` 为靠近身体的第一关节舵机，`knee` 为膝关节舵机。
/// 两个舵机均被本腿独占，外部只能通过目标点接口驱动。
#[derive(Debug)]
pub struct Leg<P: PwmOutput> {
    shoulder: Servo<P>,
    knee: Servo<P>,
    geometry: LegGeometry,
    side: Side,
}

impl<P: PwmOutput> Leg<P> {
    /// 创建腿部执行器
    pub fn new(shoulder: Servo<P>, knee: Servo<P>, geometry: LegGeometry, side: Side) -> Self {
        Self {
            shoulder,
            knee,
            geometry,
            side,
        }
    }

    /// 腿的几何参数
    #[inline]
    pub fn geometry(&self) -> &LegGeometry {
        &self.geometry
    }

    /// 腿所在侧
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// 髋关节当前命令角（诊断用）
    #[inline]
    pub fn shoulder_angle(&self) -> Deg {
        self.shoulder.current_angle()
    }

    /// 膝关节当前命令角（诊断用）
    #[inline]
    pub fn knee_angle(&self) -> Deg {
        self.knee.current_angle()
    }

    /// 立即移动足端到目标点
    ///
    /// 目标不可达返回 `Ok(false)`，两个舵机的状态都不变。角度在
    /// 下发任何脉冲之前先做双关节预校验，越界同样保证两个舵机
    /// 原地不动。
    pub fn move_to(&mut self, target: Point2<f64>) -> Result<bool> {
        let Some((shoulder_deg, knee_deg)) = self.command_angles(target)? else {
            return Ok(false);
        };

        self.shoulder.move_to(shoulder_deg)?;
        self.knee.move_to(knee_deg)?;

        trace!(
            side = %self.side,
            shoulder_deg = shoulder_deg.value(),
            knee_deg = knee_deg.value(),
            "leg commanded"
        );
        Ok(true)
    }

    /// 在给定时长内移动足端到目标点
    ///
    /// 可达性语义与 [`Leg::move_to`] 相同。两个关节按共享的
    /// 100 ms tick 锁步线性插值，最后一步精确贴合目标角。线性
    /// 路径的两端都在标定范围内，因此中间步不会越界。
    pub fn move_to_timed(&mut self, target: Point2<f64>, duration: Duration) -> Result<bool> {
        let Some((shoulder_deg, knee_deg)) = self.command_angles(target)? else {
            return Ok(false);
        };

        let shoulder_plan = LinearPlan::new(
            self.shoulder.current_angle(),
            shoulder_deg,
            duration,
            STEP_INTERVAL,
        );
        let knee_plan =
            LinearPlan::new(self.knee.current_angle(), knee_deg, duration, STEP_INTERVAL);

        let last = shoulder_plan.len().saturating_sub(1);
        for (i, (shoulder_step, knee_step)) in shoulder_plan.zip(knee_plan).enumerate() {
            self.shoulder.move_to(shoulder_step)?;
            self.knee.move_to(knee_step)?;
            if i < last {
                spin_sleep::sleep(STEP_INTERVAL);
            }
        }
        Ok(true)
    }

    /// 逆解并变换为两路舵机命令角
    ///
    /// 返回 `Ok(None)` 表示目标不可达。成功路径上已对两路命令
    /// 做过脉宽预校验。
    fn command_angles(&self, target: Point2<f64>) -> Result<Option<(Deg, Deg)>> {
        let solutions = self.geometry.solve(target);

        let solution: IkSolution = match solutions.len() {
            0 => {
                debug!(side = %self.side, x = target.x, y = target.y, "target unreachable");
                return Ok(None);
            }
            // 边界目标只有一个位形，与侧无关
            1 => solutions[0],
            _ => solutions[self.side.solution_index()],
        };

        let shoulder_deg = solution.shoulder.to_deg();
        // 膝关节：数学正方向取反进舵机坐标系，再叠加安装偏置
        let knee_deg = -solution.knee.to_deg() + self.side.knee_offset();

        // 双关节预校验：任一越界则整条命令拒绝，两个舵机都不动
        self.shoulder.calibration().pulse_for(shoulder_deg)?;
        self.knee.calibration().pulse_for(knee_deg)?;

        Ok(Some((shoulder_deg, knee_deg)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pup_hal::MockPwm;
    use pup_servo::ServoCalibration;

    fn leg(side: Side) -> Leg<MockPwm> {
        let calibration = ServoCalibration::default();
        Leg::new(
            Servo::new(MockPwm::new(50), calibration).unwrap(),
            Servo::new(MockPwm::new(50), calibration).unwrap(),
            LegGeometry::new(4.0, 8.0).unwrap(),
            side,
        )
    }

    #[test]
    fn test_reachable_target_commands_both_joints() {
        let mut leg = leg(Side::Right);
        assert!(leg.move_to(Point2::new(11.0, 0.0)).unwrap());

        let expected = leg.geometry().solve(Point2::new(11.0, 0.0))[0];
        assert!((leg.shoulder_angle().value() - expected.shoulder.to_deg().value()).abs() < 1e-9);
        assert!(
            (leg.knee_angle().value() - (-expected.knee.to_deg().value() + 90.0)).abs() < 1e-9
        );
    }

    #[test]
    fn test_unreachable_target_returns_false_without_side_effect() {
        let mut leg = leg(Side::Right);
        assert!(leg.move_to(Point2::new(11.0, 0.0)).unwrap());
        let shoulder_before = leg.shoulder_angle();
        let knee_before = leg.knee_angle();

        // 13 超出 upper + lower = 12
        assert!(!leg.move_to(Point2::new(13.0, 0.0)).unwrap());

        assert_eq!(leg.shoulder_angle(), shoulder_before);
        assert_eq!(leg.knee_angle(), knee_before);
    }

    #[test]
    fn test_sides_pick_mirrored_solutions() {
        let target = Point2::new(11.0, 0.0);
        let mut right = leg(Side::Right);
        let mut left = leg(Side::Left);

        assert!(right.move_to(target).unwrap());
        assert!(left.move_to(target).unwrap());

        // y = 0 时两侧髋关节角互为镜像
        assert!((right.shoulder_angle().value() + left.shoulder_angle().value()).abs() < 1e-9);

        // 膝舵机命令角相加恰为固定的 90° 安装偏置
        assert!(
            (right.knee_angle().value() + left.knee_angle().value() - 90.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_boundary_target_uses_single_solution_on_both_sides() {
        let target = Point2::new(12.0, 0.0);

        let mut right = leg(Side::Right);
        assert!(right.move_to(target).unwrap());
        assert_eq!(right.shoulder_angle(), Deg(0.0));
        assert_eq!(right.knee_angle(), Deg(90.0));

        let mut left = leg(Side::Left);
        assert!(left.move_to(target).unwrap());
        assert_eq!(left.shoulder_angle(), Deg(0.0));
        assert_eq!(left.knee_angle(), Deg(0.0));
    }

    #[test]
    fn test_close_target_exceeds_servo_range() {
        // 几何上可达，但左侧膝关节需要折叠近 150°，超出 ±90° 行程
        let mut leg = leg(Side::Left);
        let err = leg.move_to(Point2::new(5.0, 0.0)).unwrap_err();
        assert!(err.is_out_of_range());

        // 预校验保证两个舵机都没动
        assert_eq!(leg.shoulder_angle(), Deg::ZERO);
        assert_eq!(leg.knee_angle(), Deg::ZERO);
    }

    #[test]
    fn test_timed_move_reaches_exact_target() {
        let mut leg = leg(Side::Right);
        let target = Point2::new(11.0, 0.0);

        assert!(
            leg.move_to_timed(target, Duration::from_millis(300)).unwrap()
        );

        let expected = leg.geometry().solve(target)[0];
        assert!((leg.shoulder_angle().value() - expected.shoulder.to_deg().value()).abs() < 1e-9);
    }

    #[test]
    fn test_timed_move_unreachable_returns_false_immediately() {
        let mut leg = leg(Side::Left);
        assert!(!leg
            .move_to_timed(Point2::new(0.0, 14.0), Duration::from_secs(1))
            .unwrap());
        assert_eq!(leg.shoulder_angle(), Deg::ZERO);
        assert_eq!(leg.knee_angle(), Deg::ZERO);
    }
}
