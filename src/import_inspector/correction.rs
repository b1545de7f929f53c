use crate::import_inspector::field::FieldValue;
use crate::import_inspector::settings::{BoneOffset, ImportConfig};
use tracing::{debug, info};

// `None` when the edit has no single well-defined correction.
pub fn scale_factor(target_count: usize, previous_scale: f32, new_scale: FieldValue<f32>) -> Option<f32> {
    let FieldValue::Uniform(new_scale) = new_scale else {
        return None;
    };
    if target_count != 1 {
        return None;
    }
    if !previous_scale.is_finite() || !new_scale.is_finite() {
        return None;
    }
    if previous_scale == new_scale || previous_scale == 0.0 || new_scale == 0.0 {
        return None;
    }
    Some(new_scale / previous_scale)
}

pub fn rescale_offsets(bones: &mut [BoneOffset], factor: f32) -> usize {
    for bone in bones.iter_mut() {
        bone.position = bone.scaled(factor);
    }
    bones.len()
}

pub fn apply_scale_correction(
    targets: &mut [ImportConfig],
    previous_scale: f32,
    new_scale: FieldValue<f32>,
) -> usize {
    let Some(factor) = scale_factor(targets.len(), previous_scale, new_scale) else {
        debug!(
            targets = targets.len(),
            previous_scale,
            ?new_scale,
            "scale correction skipped"
        );
        return 0;
    };

    let target = &mut targets[0];
    let applied = rescale_offsets(&mut target.skeleton, factor);
    if applied > 0 {
        info!(record = %target.name, factor, bones = applied, "rescaled skeleton offsets");
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn bone(name: &str, parent: Option<usize>, position: [f32; 3]) -> BoneOffset {
        BoneOffset {
            name: name.to_string(),
            parent,
            position,
        }
    }

    fn rigged() -> ImportConfig {
        ImportConfig {
            name: "rig".to_string(),
            skeleton: vec![
                bone("hips", None, [1.0, 0.0, 0.0]),
                bone("spine", Some(0), [0.0, 2.0, 0.0]),
                bone("head", Some(1), [0.0, 0.0, 3.0]),
            ],
            ..ImportConfig::default()
        }
    }

    #[test]
    fn doubling_scale_doubles_offsets() {
        let mut targets = vec![rigged()];
        let applied = apply_scale_correction(&mut targets, 2.0, FieldValue::Uniform(4.0));
        assert_eq!(applied, 3);

        let positions: Vec<[f32; 3]> = targets[0].skeleton.iter().map(|b| b.position).collect();
        assert_eq!(
            positions,
            vec![[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 6.0]]
        );
        let names: Vec<&str> = targets[0].skeleton.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["hips", "spine", "head"]);
        assert_eq!(targets[0].skeleton[2].parent, Some(1));
    }

    #[rstest]
    #[case(0.0, FieldValue::Uniform(4.0))]
    #[case(2.0, FieldValue::Uniform(0.0))]
    #[case(2.0, FieldValue::Uniform(2.0))]
    #[case(2.0, FieldValue::Divergent)]
    #[case(f32::NAN, FieldValue::Uniform(4.0))]
    #[case(2.0, FieldValue::Uniform(f32::INFINITY))]
    #[case(f32::NEG_INFINITY, FieldValue::Uniform(1.0))]
    fn ambiguous_edit_is_a_noop(#[case] previous: f32, #[case] new_scale: FieldValue<f32>) {
        let mut targets = vec![rigged()];
        let before = targets.clone();
        assert_eq!(apply_scale_correction(&mut targets, previous, new_scale), 0);
        assert_eq!(targets, before);
    }

    #[test]
    fn multi_target_edit_is_a_noop_even_when_equal() {
        let mut targets = vec![rigged(), rigged()];
        let before = targets.clone();
        assert_eq!(
            apply_scale_correction(&mut targets, 1.0, FieldValue::Uniform(2.0)),
            0
        );
        assert_eq!(targets, before);
    }

    #[test]
    fn no_skeleton_applies_nothing() {
        let mut targets = vec![ImportConfig::default()];
        assert_eq!(
            apply_scale_correction(&mut targets, 1.0, FieldValue::Uniform(0.01)),
            0
        );
    }

    proptest! {
        #[test]
        fn factor_is_ratio_of_scales(previous in 0.01f32..100.0, next in 0.01f32..100.0) {
            prop_assume!(previous != next);
            let factor = scale_factor(1, previous, FieldValue::Uniform(next));
            prop_assert!(factor.is_some());
            if let Some(factor) = factor {
                assert_relative_eq!(factor * previous, next, max_relative = 1e-5);
            }
        }
    }
}
