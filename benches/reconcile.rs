use criterion::{Criterion, criterion_group, criterion_main};
use mesh_import_inspector::import_inspector::field::{FieldKey, FieldValue};
use mesh_import_inspector::import_inspector::reconcile::reconcile;
use mesh_import_inspector::import_inspector::session::InspectorSession;
use mesh_import_inspector::import_inspector::settings::{
    BoneOffset, ImportConfig, NormalMode, OptionEnum, TangentMode,
};
use std::hint::black_box;

fn reconcile_all_pairs(c: &mut Criterion) {
    c.bench_function("reconcile_all_pairs", |b| {
        b.iter(|| {
            let mut legal = 0_usize;
            for &normal in NormalMode::ALL {
                for &previous in NormalMode::ALL {
                    for &current in TangentMode::ALL {
                        for supported in [true, false] {
                            let result = reconcile(
                                black_box(normal),
                                black_box(previous),
                                supported,
                                black_box(current),
                            );
                            legal += usize::from(result.selected.is_some());
                        }
                    }
                }
            }
            legal
        })
    });
}

fn rigged_selection(records: usize, bones: usize) -> Vec<ImportConfig> {
    (0..records)
        .map(|idx| ImportConfig {
            name: format!("model_{idx}"),
            source_path: format!("models/model_{idx}.fbx"),
            skeleton: (0..bones)
                .map(|bone| BoneOffset {
                    name: format!("bone_{bone}"),
                    parent: bone.checked_sub(1),
                    position: [0.0, 0.1, 0.05],
                })
                .collect(),
            ..ImportConfig::default()
        })
        .collect()
}

fn session_normal_edit(c: &mut Criterion) {
    let selection = rigged_selection(64, 0);
    c.bench_function("session_normal_edit_64", |b| {
        b.iter(|| {
            let mut session = InspectorSession::open(selection.clone()).ok()?;
            session.set_normal_mode(NormalMode::Calculate).ok()?;
            session.tangent_view().ok()
        })
    });
}

fn apply_scale_correction(c: &mut Criterion) {
    let selection = rigged_selection(1, 256);
    c.bench_function("apply_scale_256_bones", |b| {
        b.iter(|| {
            let mut session = InspectorSession::open(selection.clone()).ok()?;
            session.set(FieldKey::GlobalScale, black_box(2.5_f32)).ok()?;
            let report = session.apply().ok()?;
            let scale = session.get::<f32>(FieldKey::GlobalScale).ok()?;
            Some((report, scale == FieldValue::Uniform(2.5)))
        })
    });
}

criterion_group!(
    benches,
    reconcile_all_pairs,
    session_normal_edit,
    apply_scale_correction
);
criterion_main!(benches);
