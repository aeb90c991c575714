use criterion::{black_box, criterion_group, criterion_main, Criterion};
use genotrack_core::{Exon, NamedSequence, SequenceSet, Transcript, Transcriptome, VisibleWindow};
use genotrack_render::{
    GridLayout, PrimitiveList, RenderRect, SequenceTrackRenderer, TranscriptTrackRenderer, ViewComposer,
    ViewOptions,
};

fn generate_sequences(length: usize) -> SequenceSet {
    let data: Vec<u8> = b"ATCGATCG".iter().cycle().take(length).copied().collect();
    std::iter::once(NamedSequence::new("chr1".into(), data)).collect()
}

fn generate_transcriptome(count: usize, exons_per_transcript: u64) -> Transcriptome {
    let mut tome = Transcriptome::new();
    for t in 0..count as u64 {
        let exons = (0..exons_per_transcript).map(|e| {
            let start = 1 + t * 7 + e * 1_000;
            Exon::new(start, start + 300)
        });
        tome.add_transcript(Transcript::new(format!("tx{}", t), "chr1".into()).with_exons(exons));
    }
    tome
}

fn bench_sequence_track(c: &mut Criterion) {
    let sequences = generate_sequences(100_000);
    let renderer = SequenceTrackRenderer::default();
    let rect = RenderRect::sized(1200.0, 60.0);

    c.bench_function("sequence_track_100bp", |b| {
        b.iter(|| {
            let output = renderer.render(
                black_box(&sequences),
                Some("chr1"),
                &rect,
                Some(VisibleWindow::new(50_000, 50_100)),
            );
            black_box(output)
        })
    });
}

fn bench_transcript_track(c: &mut Criterion) {
    let transcript = Transcript::new("tx".into(), "chr1".into())
        .with_exons((0..200u64).map(|e| Exon::new(1 + e * 500, 1 + e * 500 + 120)));
    let renderer = TranscriptTrackRenderer::default();
    let rect = RenderRect::sized(1200.0, 40.0);

    c.bench_function("transcript_track_200_exons", |b| {
        b.iter(|| {
            let output = renderer.render(
                black_box(&transcript),
                100_000,
                &rect,
                Some(VisibleWindow::new(20_000, 60_000)),
            );
            black_box(output)
        })
    });
}

fn bench_compose_view(c: &mut Criterion) {
    let sequences = generate_sequences(100_000);
    let transcriptome = generate_transcriptome(50, 20);
    let grid = GridLayout::new(1200.0, 800.0);
    let composer = ViewComposer::new(ViewOptions {
        window: Some(VisibleWindow::new(5_000, 5_090)),
        ..Default::default()
    });

    c.bench_function("compose_view_50_transcripts", |b| {
        b.iter(|| {
            let mut surface = PrimitiveList::new();
            let report = composer.compose(&grid, black_box(&sequences), &transcriptome, &mut surface);
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_sequence_track, bench_transcript_track, bench_compose_view);
criterion_main!(benches);
