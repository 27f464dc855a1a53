//! Performance benchmarks for GLSL generation.
//!
//! Measures whole-program generation through [`Unit`] at growing sizes, plus
//! the hot single operations (binding emission and stage assembly).
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use vsl::{
    BindingVariable, Generator, InterfaceVariable, ShaderStage, StructMember, StructType,
    TypeRegistry, Unit, Variable,
};

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Print total time per top-level scope over all recorded frames.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;
    use std::collections::BTreeMap;

    let Some(frame_view) = FRAME_VIEW.get() else {
        return;
    };
    let view = frame_view.lock();
    let scope_collection = view.scope_collection();

    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for frame in view.recent_frames() {
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread, stream_info) in unpacked.thread_streams.iter() {
            let Ok(scopes) = Reader::from_start(&stream_info.stream).read_top_scopes() else {
                continue;
            };
            for scope in scopes {
                if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
                    *totals.entry(details.name().to_string()).or_insert(0) +=
                        scope.record.duration_ns;
                }
            }
        }
    }

    println!("\n=== Generator scopes ===");
    for (name, ns) in &totals {
        println!("  {name:<40} {:>10.3} ms", *ns as f64 / 1_000_000.0);
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

/// Build a program with `count` bindings, locals and statements.
fn build_program(count: u32) -> usize {
    let mut unit = Unit::new();
    let float4 = unit.resolve_type("float4").unwrap();
    let float2 = unit.resolve_type("float2").unwrap();
    let sampler = unit.resolve_type("Sampler").unwrap();

    let material = unit
        .add_struct(StructType::new(
            "Material",
            vec![
                StructMember::new("albedo", float4.clone()),
                StructMember::new("offsets", float2.clone()).with_array_size(4),
            ],
        ))
        .unwrap();
    let buffer = unit
        .resolve_type("ROBuffer")
        .and_then(|ty| ty.with_body(material))
        .unwrap();
    unit.add_binding(BindingVariable::new("materials", Arc::new(buffer)))
        .unwrap();

    unit.add_vertex_input(InterfaceVariable::new("position", float4.clone(), 0))
        .unwrap();
    for i in 0..count {
        unit.add_binding(BindingVariable::new(format!("smp{i}"), sampler.clone()))
            .unwrap();
        unit.add_local(
            Variable::local(format!("v{i}"), float2.clone(), false),
            ShaderStage::Vertex,
            ShaderStage::Fragment,
        )
        .unwrap();
    }

    unit.begin_stage(ShaderStage::Vertex).unwrap();
    for i in 0..count {
        unit.generator_mut()
            .emit_assignment(&format!("_vert_v{i}"), "=", "position.xy")
            .unwrap();
    }
    unit.end_stage().unwrap();

    unit.begin_stage(ShaderStage::Fragment).unwrap();
    for i in 0..count {
        unit.use_binding_index(i % 64).unwrap();
        let g = unit.generator_mut();
        g.emit_if(&format!("_frag_v{i}.x > 0.5")).unwrap();
        g.emit_assignment("color", "+=", &format!("_frag_v{i}.xyxy"))
            .unwrap();
        g.emit_block_close().unwrap();
    }
    unit.end_stage().unwrap();

    let shaders = unit.build().unwrap();
    shaders.iter().map(|(_, source)| source.len()).sum()
}

fn program_benchmarks(c: &mut Criterion) {
    setup_profiler();

    let mut group = c.benchmark_group("unit/program_sizes");
    for count in [1u32, 16, 128, 1024] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let len = build_program(black_box(count));
                end_profiling_frame();
                black_box(len)
            });
        });
    }
    group.finish();

    print_profiling_stats();
}

fn operation_benchmarks(c: &mut Criterion) {
    let registry = TypeRegistry::new();
    let sampler = registry.resolve("SamplerShadow").unwrap();
    let float3 = registry.resolve("float3").unwrap();

    let mut group = c.benchmark_group("generator/operations");

    group.bench_function("emit_binding_shared_table", |b| {
        b.iter(|| {
            let mut generator = Generator::default();
            for i in 0..64 {
                let binding = BindingVariable::new(format!("s{i}"), sampler.clone());
                generator.emit_binding(black_box(&binding)).unwrap();
            }
            black_box(generator.globals().len())
        });
    });

    group.bench_function("emit_binding_index_memoized", |b| {
        b.iter(|| {
            let mut generator = Generator::default();
            generator.begin_stage(ShaderStage::Fragment).unwrap();
            for i in 0..1024u32 {
                generator.emit_binding_index(black_box(i % 8)).unwrap();
            }
            generator.end_stage().unwrap();
        });
    });

    let mut generator = Generator::default();
    for i in 0..256 {
        let var = InterfaceVariable::new(format!("in{i}"), float3.clone(), i);
        generator.emit_vertex_input(&var).unwrap();
    }
    generator.begin_stage(ShaderStage::Vertex).unwrap();
    for i in 0..256 {
        generator
            .emit_assignment(&format!("x{i}"), "=", &format!("in{i}"))
            .unwrap();
    }
    generator.end_stage().unwrap();

    group.bench_function("stage_source", |b| {
        b.iter(|| black_box(generator.stage_source(ShaderStage::Vertex)));
    });

    group.finish();
}

criterion_group!(benches, program_benchmarks, operation_benchmarks);
criterion_main!(benches);
