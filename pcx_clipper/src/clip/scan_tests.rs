use glam::Vec3;
use super::*;

const STRATEGIES: [ScanStrategy; 2] = [ScanStrategy::Append, ScanStrategy::FixedSlot];

fn run(points: &[Vec3], volume: &ClipVolume, strategy: ScanStrategy, block_size: usize) -> Vec<u32> {
    let mut out = SurvivorIndices::with_capacity(points.len());
    scan_into(points, volume, strategy, block_size, &mut out);
    out.into_vec()
}

/// Deterministic pseudo-random cloud in [-2, 2)^3 (xorshift).
fn cloud(count: usize, seed: u32) -> Vec<Vec3> {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state as f32 / u32::MAX as f32) * 4.0 - 2.0
    };
    (0..count).map(|_| Vec3::new(next(), next(), next())).collect()
}

fn reference(points: &[Vec3], volume: &ClipVolume) -> Vec<u32> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| volume.contains(**p))
        .map(|(i, _)| i as u32)
        .collect()
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_boundary_outside_inside_scenario() {
    let points = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(0.5, 0.5, 0.5),
    ];
    let volume = ClipVolume::new(Vec3::ZERO, Vec3::ONE);
    for strategy in STRATEGIES {
        assert_eq!(run(&points, &volume, strategy, DEFAULT_BLOCK_SIZE), vec![2]);
    }
}

#[test]
fn test_empty_point_set() {
    let volume = ClipVolume::default();
    for strategy in STRATEGIES {
        assert!(run(&[], &volume, strategy, DEFAULT_BLOCK_SIZE).is_empty());
    }
    assert!(scan(&[], &volume).is_empty());
}

#[test]
fn test_index_zero_discarded_is_not_reported() {
    // Point 0 outside, nothing else: the output must be empty, not [0]
    let points = [Vec3::splat(5.0), Vec3::splat(6.0)];
    let volume = ClipVolume::new(Vec3::ZERO, Vec3::ONE);
    for strategy in STRATEGIES {
        assert!(run(&points, &volume, strategy, 1).is_empty());
    }
}

// ============================================================================
// Containing / disjoint boxes
// ============================================================================

#[test]
fn test_containing_box_returns_full_range() {
    let points = cloud(1000, 7);
    let volume = ClipVolume::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    let expected: Vec<u32> = (0..1000).collect();
    for strategy in STRATEGIES {
        assert_eq!(run(&points, &volume, strategy, DEFAULT_BLOCK_SIZE), expected);
    }
}

#[test]
fn test_disjoint_box_returns_nothing() {
    let points = cloud(1000, 11);
    let volume = ClipVolume::new(Vec3::splat(50.0), Vec3::splat(60.0));
    for strategy in STRATEGIES {
        assert!(run(&points, &volume, strategy, DEFAULT_BLOCK_SIZE).is_empty());
    }
}

#[test]
fn test_empty_volume_returns_nothing() {
    let points = cloud(300, 5);
    let volume = ClipVolume::new(Vec3::ONE, Vec3::ZERO);
    for strategy in STRATEGIES {
        assert!(run(&points, &volume, strategy, 16).is_empty());
    }
}

// ============================================================================
// Membership and ordering
// ============================================================================

#[test]
fn test_matches_sequential_reference_for_odd_block_sizes() {
    let volume = ClipVolume::new(Vec3::splat(-1.0), Vec3::new(1.0, 0.5, 1.5));
    // Sizes that are not multiples of the block size exercise the tail block
    for &count in &[1usize, 127, 128, 129, 1001, 4099] {
        let points = cloud(count, count as u32);
        let expected = reference(&points, &volume);
        for strategy in STRATEGIES {
            for &block_size in &[1usize, 3, 64, DEFAULT_BLOCK_SIZE, 5000] {
                let got = run(&points, &volume, strategy, block_size);
                assert_eq!(got, expected,
                    "count={} strategy={:?} block={}", count, strategy, block_size);
            }
        }
    }
}

#[test]
fn test_survivors_strictly_ascending() {
    let points = cloud(20_000, 99);
    let volume = ClipVolume::new(Vec3::splat(-1.5), Vec3::splat(1.5));
    for strategy in STRATEGIES {
        let got = run(&points, &volume, strategy, 32);
        assert!(!got.is_empty());
        assert!(got.windows(2).all(|w| w[0] < w[1]), "{:?} not ascending", strategy);
    }
}

#[test]
fn test_block_size_zero_is_clamped() {
    let points = cloud(50, 3);
    let volume = ClipVolume::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    for strategy in STRATEGIES {
        assert_eq!(run(&points, &volume, strategy, 0), reference(&points, &volume));
    }
}

// ============================================================================
// Idempotence and buffer reuse
// ============================================================================

#[test]
fn test_rescan_is_identical() {
    let points = cloud(5000, 21);
    let volume = ClipVolume::new(Vec3::splat(-0.7), Vec3::splat(0.9));
    for strategy in STRATEGIES {
        let mut out = SurvivorIndices::with_capacity(points.len());
        scan_into(&points, &volume, strategy, DEFAULT_BLOCK_SIZE, &mut out);
        let first = out.clone();
        scan_into(&points, &volume, strategy, DEFAULT_BLOCK_SIZE, &mut out);
        assert_eq!(out.as_slice(), first.as_slice());
    }
}

#[test]
fn test_prior_contents_are_discarded() {
    let points = cloud(400, 8);
    let wide = ClipVolume::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    let narrow = ClipVolume::new(Vec3::splat(-0.5), Vec3::splat(0.5));
    for strategy in STRATEGIES {
        let mut out = SurvivorIndices::with_capacity(points.len());
        scan_into(&points, &wide, strategy, 16, &mut out);
        assert_eq!(out.len(), 400);
        scan_into(&points, &narrow, strategy, 16, &mut out);
        assert_eq!(out.as_slice(), reference(&points, &narrow).as_slice());
    }
}

#[test]
fn test_buffer_capacity_is_reused() {
    let points = cloud(2048, 4);
    let volume = ClipVolume::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    for strategy in STRATEGIES {
        let mut out = SurvivorIndices::with_capacity(points.len());
        let capacity = out.capacity();
        scan_into(&points, &volume, strategy, DEFAULT_BLOCK_SIZE, &mut out);
        assert_eq!(out.capacity(), capacity);
    }
}

#[test]
fn test_strategies_agree() {
    let points = cloud(10_000, 1234);
    let volume = ClipVolume::from_center_size(Vec3::new(0.3, -0.2, 0.1), Vec3::splat(1.7));
    assert_eq!(
        run(&points, &volume, ScanStrategy::Append, 100),
        run(&points, &volume, ScanStrategy::FixedSlot, 100),
    );
}
