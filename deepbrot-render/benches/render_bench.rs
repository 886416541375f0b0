use criterion::{criterion_group, criterion_main, Criterion};

use deepbrot_core::{ComplexDF, DoubleFloat, FractalParams, IterationEngine, Viewport};
use deepbrot_render::{render, FrameRequest, Palette, PaletteTable, RenderCancel, RenderContext};

fn bench_full_frame_render(c: &mut Criterion) {
    let engine = IterationEngine::new(FractalParams::default());
    let viewport = Viewport::default_mandelbrot(640, 480);
    let cancel = RenderCancel::new();

    c.bench_function("full_frame_640x480", |b| {
        b.iter(|| render(&engine, &viewport, &cancel));
    });
}

fn bench_deep_zoom(c: &mut Criterion) {
    let engine = IterationEngine::new(FractalParams::default().with_max_iterations(1000));
    let center = ComplexDF::from_f64(-0.743_643_887_037_151, 0.131_825_904_205_33);
    let viewport = Viewport::new(center, 1e7, 256, 256).unwrap();
    let cancel = RenderCancel::new();

    c.bench_function("deep_zoom_256x256_1000iter", |b| {
        b.iter(|| render(&engine, &viewport, &cancel));
    });
}

fn bench_double_float_mul(c: &mut Criterion) {
    let a = DoubleFloat::from_f64(std::f64::consts::PI);
    let b = DoubleFloat::from_f64(std::f64::consts::E);

    c.bench_function("double_float_mul", |bench| {
        bench.iter(|| std::hint::black_box(a) * std::hint::black_box(b));
    });
}

fn bench_colorize(c: &mut Criterion) {
    let engine = IterationEngine::new(FractalParams::default());
    let viewport = Viewport::default_mandelbrot(640, 480);
    let result = render(&engine, &viewport, &RenderCancel::new());
    let table = PaletteTable::default();

    c.bench_function("colorize_640x480", |b| {
        b.iter(|| table.colorize(&result.iterations));
    });
}

fn bench_palette_table_build(c: &mut Criterion) {
    let palette = Palette::builtin("rainbow").unwrap();

    c.bench_function("palette_table_build", |b| {
        b.iter(|| PaletteTable::build(&palette));
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let ctx = RenderContext::new(0, &Palette::default()).unwrap();
    let request = FrameRequest::new(Viewport::default_mandelbrot(320, 240), FractalParams::default());

    c.bench_function("render_frame_320x240", |b| {
        b.iter(|| ctx.render_frame(&request).unwrap());
    });
}

criterion_group!(
    benches,
    bench_full_frame_render,
    bench_deep_zoom,
    bench_double_float_mul,
    bench_colorize,
    bench_palette_table_build,
    bench_render_frame
);
criterion_main!(benches);
