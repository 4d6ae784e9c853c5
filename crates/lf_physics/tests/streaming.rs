// crates/lf_physics/tests/streaming.rs

//! 相位往返验证
//!
//! 纯流动（恒等碰撞）下，一个偶相位加一个奇相位必须精确复现
//! 直接两次邻移流动的结果：每个方向的分布沿其速度精确前进
//! 两个格距，无任何数值篡改。

use lf_foundation::Scalar;
use lf_lattice::{D3Q27, Lattice};
use lf_physics::collision::{moments, CollideStream, Moments};
use lf_physics::types::RelaxationScaled;
use lf_physics::{Boundaries, Parity, Simulation, SimulationConfig};

type L = D3Q27;

/// 恒等碰撞：只计算矩，不改变分布
struct Identity;

impl<S: Scalar> CollideStream<S, L> for Identity {
    const NAME: &'static str = "identity";

    fn collide(f: &mut [S; 32], _relax: &RelaxationScaled<S>) -> Moments<S> {
        moments::<S, L>(f)
    }
}

const N: usize = 8;

fn seed_value(x: usize, y: usize, z: usize, s: usize) -> f64 {
    let cell = (z * N + y) * N + x;
    0.01 + (cell * 32 + s) as f64 * 1.0e-6
}

fn config() -> SimulationConfig {
    SimulationConfig {
        nx: N,
        ny: N,
        nz: N,
        nt: 2,
        re: 8.0,
        u: 0.05,
        l: 8,
        rho0: 1.0,
        u0: [0.0; 3],
        save: false,
        ..SimulationConfig::default()
    }
}

#[test]
fn even_odd_pair_equals_two_neighbour_shifts() {
    let mut sim: Simulation<f64, L, Identity> =
        Simulation::new(config(), Boundaries::default()).unwrap();

    // 每个物理槽位放一个唯一标记值（覆盖初始化写入的平衡分布）
    let lay = sim.population().layout();
    {
        let raw = sim.population_mut().raw_mut();
        raw.fill(0.0);
        for z in 0..N {
            for y in 0..N {
                for x in 0..N {
                    for n in 0..2 {
                        for d in 0..L::HSPEED {
                            if !L::is_physical(n, d) {
                                continue;
                            }
                            let s = n * L::OFF + d;
                            raw[lay.spatial_to_linear(x, y, z, 0, n, d)] = seed_value(x, y, z, s);
                        }
                    }
                }
            }
        }
    }

    sim.step(Parity::Even);
    sim.step(Parity::Odd);

    // 完成一对相位后，方向 (n,d) 在单元 x 的值应来自 x - 2c
    let raw = sim.population().raw();
    let wrap = |i: usize, c: i32| -> usize {
        (((i as i64) - 2 * c as i64).rem_euclid(N as i64)) as usize
    };
    for z in 0..N {
        for y in 0..N {
            for x in 0..N {
                for n in 0..2 {
                    for d in 0..L::HSPEED {
                        if !L::is_physical(n, d) {
                            continue;
                        }
                        let s = n * L::OFF + d;
                        let sx = wrap(x, L::DX[s]);
                        let sy = wrap(y, L::DY[s]);
                        let sz = wrap(z, L::DZ[s]);
                        let got = raw[lay.spatial_to_linear(x, y, z, 0, n, d)];
                        let want = seed_value(sx, sy, sz, s);
                        assert!(
                            (got - want).abs() < 1e-15,
                            "cell ({x},{y},{z}) slot {s}: got {got}, want {want}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn ghost_and_padding_slots_stay_zero() {
    let mut sim: Simulation<f64, L, Identity> =
        Simulation::new(config(), Boundaries::default()).unwrap();
    for _ in 0..4 {
        sim.step_pair();
    }
    let lay = sim.population().layout();
    let raw = sim.population().raw();
    for z in 0..N {
        for y in 0..N {
            for x in 0..N {
                assert_eq!(raw[lay.spatial_to_linear(x, y, z, 0, 1, 0)], 0.0);
                for n in 0..2 {
                    for d in L::HSPEED..L::OFF {
                        assert_eq!(raw[lay.spatial_to_linear(x, y, z, 0, n, d)], 0.0);
                    }
                }
            }
        }
    }
}
