//! The fixed builtin type table.
//!
//! Built once on first use and never mutated. User types live in a separate
//! map inside each [`TypeRegistry`](crate::TypeRegistry).

use std::sync::Arc;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use vsl_core::{ImageDims, NumericType, ScalarKind, ShaderType, TexelType, TypeRef};

/// Dimensionalities that have a name suffix in the builtin table.
const IMAGE_DIMS: [(&str, ImageDims); 7] = [
    ("1D", ImageDims::D1),
    ("2D", ImageDims::D2),
    ("3D", ImageDims::D3),
    ("1DArray", ImageDims::D1Array),
    ("2DArray", ImageDims::D2Array),
    ("Cube", ImageDims::Cube),
    ("CubeArray", ImageDims::CubeArray),
];

lazy_static! {
    static ref BUILTIN_TYPES: FxHashMap<String, TypeRef> = build_builtins();
}

/// The builtin type table.
pub fn builtin_types() -> &'static FxHashMap<String, TypeRef> {
    &BUILTIN_TYPES
}

fn build_builtins() -> FxHashMap<String, TypeRef> {
    let mut types: FxHashMap<String, TypeRef> = FxHashMap::default();
    let mut add = |name: &str, ty: ShaderType| {
        types.insert(name.to_string(), Arc::new(ty));
    };

    add("void", ShaderType::Void);

    // Scalars and vectors
    let vectors: [(ScalarKind, [&'static str; 4]); 4] = [
        (ScalarKind::Boolean, ["bool", "bool2", "bool3", "bool4"]),
        (ScalarKind::Signed, ["int", "int2", "int3", "int4"]),
        (ScalarKind::Unsigned, ["uint", "uint2", "uint3", "uint4"]),
        (ScalarKind::Float, ["float", "float2", "float3", "float4"]),
    ];
    for (base, names) in vectors {
        for (rows, name) in (1u8..).zip(names) {
            add(name, NumericType::vector(base, rows).into());
        }
    }

    // Matrices: floatCxR has C columns of R rows
    let matrices: [(&'static str, u8, u8); 9] = [
        ("float2x2", 2, 2),
        ("float3x3", 3, 3),
        ("float4x4", 4, 4),
        ("float2x3", 2, 3),
        ("float3x2", 3, 2),
        ("float2x4", 2, 4),
        ("float4x2", 4, 2),
        ("float3x4", 3, 4),
        ("float4x3", 4, 3),
    ];
    for (name, cols, rows) in matrices {
        add(name, NumericType::matrix(cols, rows).into());
    }

    // Samplers
    add(
        "Sampler",
        ShaderType::Sampler {
            dims: ImageDims::None,
        },
    );
    add(
        "SamplerShadow",
        ShaderType::Sampler {
            dims: ImageDims::Shadow,
        },
    );

    for (suffix, dims) in IMAGE_DIMS {
        add(&format!("Sampler{suffix}"), ShaderType::BoundSampler { dims });

        for (prefix, base) in [
            ("", ScalarKind::Float),
            ("I", ScalarKind::Signed),
            ("U", ScalarKind::Unsigned),
        ] {
            add(
                &format!("{prefix}Texture{suffix}"),
                ShaderType::Texture {
                    dims,
                    texel: TexelType::new(base, 4, 4),
                },
            );
        }

        add(
            &format!("Image{suffix}"),
            ShaderType::Image { dims, texel: None },
        );
    }

    // Buffers and texel buffers, completed by the front-end
    add("Uniform", ShaderType::Uniform { body: None });
    add("ROBuffer", ShaderType::ReadOnlyBuffer { body: None });
    add("RWBuffer", ShaderType::ReadWriteBuffer { body: None });
    add("ROTexels", ShaderType::ReadOnlyTexels { texel: None });
    add("RWTexels", ShaderType::ReadWriteTexels { texel: None });

    // Subpass inputs
    add(
        "Input",
        ShaderType::SubpassInput {
            texel: TexelType::new(ScalarKind::Float, 4, 4),
        },
    );
    add(
        "IInput",
        ShaderType::SubpassInput {
            texel: TexelType::new(ScalarKind::Signed, 4, 4),
        },
    );
    add(
        "UInput",
        ShaderType::SubpassInput {
            texel: TexelType::new(ScalarKind::Unsigned, 4, 4),
        },
    );

    types
}
