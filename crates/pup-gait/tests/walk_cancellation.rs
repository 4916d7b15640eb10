//! 行走循环取消的跨线程集成测试
//!
//! 行走循环在工作线程运行，控制线程发出取消后，循环必须在一个
//! 完整步周期内观察到并干净退出，四条腿回到站立姿态。

use std::time::Duration;

use pup_gait::{LegId, Quadruped, RobotConfig, cancel_pair};
use pup_hal::MockPwm;
use pup_kinematics::Point2;

fn quick_config() -> RobotConfig {
    let mut config = RobotConfig::default();
    config.gait.step_interval_ms = 5;
    config
}

#[test]
fn walk_loop_exits_cleanly_on_cancel() {
    let config = quick_config();
    let robot = Quadruped::from_config(&config, || MockPwm::new(50)).unwrap();

    let (handle, token) = cancel_pair();
    let (done_tx, done_rx) = crossbeam_channel::bounded(1);

    let worker = std::thread::spawn(move || {
        let mut robot = robot;
        let cycles = robot.walk(&token, None).unwrap();
        done_tx.send(cycles).unwrap();
        robot
    });

    // 让循环先走起来，再请求取消
    std::thread::sleep(Duration::from_millis(40));
    handle.cancel();

    // 一个完整步周期内必须观察到取消（这里留足余量）
    let _cycles = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("walk loop did not observe cancellation");

    let robot = worker.join().unwrap();

    // 退出后四条腿都停在站立姿态
    let stand = Point2::new(config.gait.stand[0], config.gait.stand[1]);
    for id in LegId::ALL {
        let leg = robot.leg(id);
        let solutions = leg.geometry().solve(stand);
        let expected = match solutions.len() {
            1 => solutions[0],
            _ => solutions[leg.side().solution_index()],
        };

        let shoulder = leg.shoulder_angle().value();
        assert!(
            (shoulder - expected.shoulder.to_deg().value()).abs() < 1e-9,
            "{id} leg not in stand posture after cancel (shoulder = {shoulder:.2}°)"
        );
    }
}

#[test]
fn bounded_walk_ignores_token_until_cycles_done() {
    let robot = Quadruped::from_config(&quick_config(), || MockPwm::new(50)).unwrap();
    let (_handle, token) = cancel_pair();

    let mut robot = robot;
    let cycles = robot.walk(&token, Some(1)).unwrap();
    assert_eq!(cycles, 1);
}
