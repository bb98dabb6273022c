use criterion::{black_box, criterion_group, criterion_main, Criterion};
use passchart::core::{GrayImage, MarkerPixel, PassCount, RgbImage};
use passchart::field::FIELD_GREY;
use passchart::markers::{cluster_events, nl_means_denoise, ClusterParams, NlMeansParams};
use passchart::{OutcomeKind, PassChartExtractor};

const GREEN: [u8; 3] = [40, 200, 60];
const WHITE: [u8; 3] = [245, 245, 245];

fn disc(img: &mut RgbImage, cx: usize, cy: usize, color: [u8; 3]) {
    for y in cy - 6..=cy + 6 {
        for x in cx - 6..=cx + 6 {
            let (dx, dy) = (x as i64 - cx as i64, y as i64 - cy as i64);
            if dx * dx + dy * dy <= 36 {
                img.put(x, y, color);
            }
        }
    }
}

fn make_chart() -> RgbImage {
    let mut img = RgbImage::filled(1200, 1200, FIELD_GREY);
    for i in 0..8 {
        disc(&mut img, 200 + i * 100, 150 + i * 40, GREEN);
        disc(&mut img, 240 + i * 90, 420 - i * 25, WHITE);
    }
    img
}

fn bench_extract(c: &mut Criterion) {
    let raw = make_chart();
    let counts = PassCount {
        completions: 8,
        touchdowns: 0,
        interceptions: 0,
        incompletions: 8,
    };
    let extractor = PassChartExtractor::default();
    c.bench_function("extract_1200x1200_16_markers", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&raw), &counts)))
    });
}

fn bench_denoise(c: &mut Criterion) {
    let mut mask = GrayImage::new(400, 300);
    for y in 100..130 {
        for x in 150..180 {
            mask.data[y * 400 + x] = 240;
        }
    }
    let params = NlMeansParams::with_h(10.0);
    c.bench_function("nl_means_400x300_one_blob", |b| {
        b.iter(|| black_box(nl_means_denoise(black_box(&mask), &params)))
    });
}

fn bench_cluster(c: &mut Criterion) {
    let mut pixels = Vec::new();
    for k in 0..10u32 {
        for r in 0..12 {
            for col in 0..12 {
                pixels.push(MarkerPixel::new(50 + k * 40 + r, 100 + k * 70 + col));
            }
        }
    }
    let params = ClusterParams::default();
    c.bench_function("cluster_incomplete_10x144px", |b| {
        b.iter(|| {
            black_box(cluster_events(
                black_box(&pixels),
                OutcomeKind::Incomplete,
                10,
                &params,
            ))
        })
    });
}

criterion_group!(extract, bench_extract, bench_denoise, bench_cluster);
criterion_main!(extract);
