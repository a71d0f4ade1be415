use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use hangul_drill::engine::selector::{DrawContext, FocusMode};
use hangul_drill::engine::unlock::compute_unlocked;
use hangul_drill::engine::{HANGUL_JAMO, MasteryRecord};
use hangul_drill::session::lookahead::LookaheadQueue;

fn half_mastered() -> MasteryRecord {
    let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
    for (i, s) in HANGUL_JAMO.iter().enumerate() {
        mastery.set_score(s.glyph, (i % 6) as i64);
    }
    mastery
}

fn bench_unlock(c: &mut Criterion) {
    let mastery = half_mastered();
    c.bench_function("compute_unlocked (40 symbols)", |b| {
        b.iter(|| compute_unlocked(black_box(&mastery), HANGUL_JAMO).len())
    });
}

fn bench_select(c: &mut Criterion) {
    let mastery = half_mastered();
    let unlocked = compute_unlocked(&mastery, HANGUL_JAMO);
    let mut rng = SmallRng::seed_from_u64(1);

    for mode in [FocusMode::All, FocusMode::Consonant] {
        let ctx = DrawContext::new(unlocked, &mastery, mode);
        c.bench_function(&format!("select_next ({})", mode.to_key()), |b| {
            b.iter(|| ctx.select_next(black_box(&['ㄱ', 'ㄴ']), &mut rng))
        });
    }
}

fn bench_queue(c: &mut Criterion) {
    let mastery = half_mastered();
    let unlocked = compute_unlocked(&mastery, HANGUL_JAMO);
    let ctx = DrawContext::new(unlocked, &mastery, FocusMode::All);
    let mut rng = SmallRng::seed_from_u64(2);
    let mut queue = LookaheadQueue::new(3);
    queue.fill(None, &ctx, &mut rng);

    c.bench_function("lookahead advance", |b| {
        b.iter(|| queue.advance(&ctx, &mut rng))
    });
}

criterion_group!(benches, bench_unlock, bench_select, bench_queue);
criterion_main!(benches);
