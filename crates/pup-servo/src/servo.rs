//! 舵机执行器
//!
//! 对单个 PWM 汇端的独占包装：标定内的角度命令映射为脉宽并下发，
//! 同时维护"当前命令角"不变量。定时移动是系统内唯一的时域运动
//! 原语，按固定 tick 阻塞执行。

use std::time::Duration;

use pup_hal::PwmOutput;
use pup_kinematics::Deg;
use tracing::trace;

use crate::calibration::ServoCalibration;
use crate::trajectory::LinearPlan;
use crate::{Result, ServoError};

/// 定时移动的步进间隔（系统唯一的时域运动粒度）
pub const STEP_INTERVAL: Duration = Duration::from_millis(100);

/// 舵机执行器
///
/// 独占持有一个 PWM 汇端。`current_angle` 永远等于最近一次成功
/// 命令的角度；被拒绝的命令（越界、硬件失败）不改变它。
#[derive(Debug)]
pub struct Servo<P: PwmOutput> {
    pwm: P,
    calibration: ServoCalibration,
    current_angle: Deg,
}

impl<P: PwmOutput> Servo<P> {
    /// 创建舵机执行器
    ///
    /// 校验汇端频率与标定一致；上电姿态视为零角。
    pub fn new(pwm: P, calibration: ServoCalibration) -> Result<Self> {
        if pwm.frequency() != calibration.frequency_hz() {
            return Err(ServoError::FrequencyMismatch {
                expected: calibration.frequency_hz(),
                actual: pwm.frequency(),
            });
        }

        Ok(Self {
            pwm,
            calibration,
            current_angle: Deg::ZERO,
        })
    }

    /// 当前命令角（最近一次成功命令的角度）
    #[inline]
    pub fn current_angle(&self) -> Deg {
        self.current_angle
    }

    /// 舵机标定
    #[inline]
    pub fn calibration(&self) -> &ServoCalibration {
        &self.calibration
    }

    /// 立即移动到指定角度
    ///
    /// 映射脉宽并下发。越界角度返回错误，不输出任何脉冲；
    /// 仅在脉冲成功下发后才更新当前命令角。
    pub fn move_to(&mut self, angle: Deg) -> Result<()> {
        let pulse = self.calibration.pulse_for(angle)?;
        self.pwm.set_pulse_width(pulse)?;

        self.current_angle = angle;
        trace!(
            angle_deg = angle.value(),
            pulse_us = pulse.as_micros() as u64,
            "servo commanded"
        );
        Ok(())
    }

    /// 在给定时长内匀速移动到指定角度
    ///
    /// 从当前命令角线性插值，每 [`STEP_INTERVAL`] 下发一步，步间
    /// 阻塞当前线程；最后一步精确贴合目标角。中途失败时舵机停在
    /// 最近一次成功的步进角上。
    pub fn move_to_timed(&mut self, angle: Deg, duration: Duration) -> Result<()> {
        let plan = LinearPlan::new(self.current_angle, angle, duration, STEP_INTERVAL);
        let last = plan.len().saturating_sub(1);

        for (i, step_angle) in plan.enumerate() {
            self.move_to(step_angle)?;
            if i < last {
                spin_sleep::sleep(STEP_INTERVAL);
            }
        }
        Ok(())
    }

    /// 释放汇端
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pup_hal::MockPwm;

    fn servo() -> Servo<MockPwm> {
        Servo::new(MockPwm::new(50), ServoCalibration::default()).unwrap()
    }

    #[test]
    fn test_move_to_commands_pulse_and_tracks_angle() {
        let mut servo = servo();
        servo.move_to(Deg(45.0)).unwrap();

        assert_eq!(servo.current_angle(), Deg(45.0));
        let pulse = servo.into_inner().last_pulse().unwrap();
        assert!((pulse.as_secs_f64() - 2100e-6).abs() < 1e-9);
    }

    #[test]
    fn test_rejected_move_leaves_angle_unchanged() {
        let mut servo = servo();
        servo.move_to(Deg(30.0)).unwrap();

        let err = servo.move_to(Deg(120.0)).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(servo.current_angle(), Deg(30.0));

        // 越界命令不产生任何脉冲
        assert_eq!(servo.into_inner().pulses().len(), 1);
    }

    #[test]
    fn test_hal_fault_leaves_angle_unchanged() {
        let mut servo = servo();
        servo.move_to(Deg(10.0)).unwrap();

        servo.pwm.fail_next();
        assert!(servo.move_to(Deg(20.0)).is_err());
        assert_eq!(servo.current_angle(), Deg(10.0));
    }

    #[test]
    fn test_frequency_mismatch_rejected() {
        let err = Servo::new(MockPwm::new(60), ServoCalibration::default()).unwrap_err();
        assert!(matches!(err, ServoError::FrequencyMismatch { .. }));
    }

    #[test]
    fn test_timed_move_issues_steps_and_snaps() {
        let mut servo = servo();
        // 300ms：3 个中间步 + 收尾贴合
        servo
            .move_to_timed(Deg(30.0), Duration::from_millis(300))
            .unwrap();

        assert_eq!(servo.current_angle(), Deg(30.0));

        let pulses = servo.into_inner().pulses().to_vec();
        assert_eq!(pulses.len(), 4);

        // 收尾步与 30° 的映射完全一致
        let expected = ServoCalibration::default().pulse_for(Deg(30.0)).unwrap();
        assert_eq!(*pulses.last().unwrap(), expected);
    }

    #[test]
    fn test_timed_move_out_of_range_target_fails_fast() {
        let mut servo = servo();
        // 第一个中间步就越界，舵机保持原角
        assert!(
            servo
                .move_to_timed(Deg(300.0), Duration::from_millis(200))
                .is_err()
        );
        assert_eq!(servo.current_angle(), Deg::ZERO);
    }
}
