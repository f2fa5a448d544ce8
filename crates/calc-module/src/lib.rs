//! # calc-module: Numeric Primitives
//!
//! Source of `calc.wasm`, the module the calculator loads at startup.
//!
//! ## Export Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Required                          Optional (host falls back to std)    │
//! │  ────────                          ────────                             │
//! │  add(x, y)   sub(x, y)             mod(x, y)                            │
//! │  mul(x, y)   div(x, y)             sin(r)  cos(r)  tan(r)               │
//! │  power(x, y)                       asin(x) acos(x) atan(x)              │
//! │  inc(x)      dec(x)                exp(x)  ln(x)                        │
//! │  factorial(x)                                                           │
//! │                                                                         │
//! │  All f64 → f64. Angles are radians.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Export names are only applied on `wasm32`: on native targets several of
//! them (`div`, `sin`, `exp`) would collide with libc/libm symbols.
//!
//! On `wasm32` the exported symbol *is* the libm symbol: `export_name = "sin"`
//! replaces the `sin` that `f64::sin` lowers to. The transcendental exports
//! therefore go through the `libm` crate (plain Rust, no libcalls) and never
//! through the `f64` methods, which would recurse into themselves.

#[cfg_attr(target_arch = "wasm32", export_name = "add")]
pub extern "C" fn add(x: f64, y: f64) -> f64 {
    x + y
}

#[cfg_attr(target_arch = "wasm32", export_name = "sub")]
pub extern "C" fn sub(x: f64, y: f64) -> f64 {
    x - y
}

#[cfg_attr(target_arch = "wasm32", export_name = "mul")]
pub extern "C" fn mul(x: f64, y: f64) -> f64 {
    x * y
}

/// IEEE division; the host rejects zero divisors before calling.
#[cfg_attr(target_arch = "wasm32", export_name = "div")]
pub extern "C" fn div(x: f64, y: f64) -> f64 {
    x / y
}

#[cfg_attr(target_arch = "wasm32", export_name = "power")]
pub extern "C" fn power(x: f64, y: f64) -> f64 {
    x.powf(y)
}

/// Floored modulo, sign of the divisor.
#[cfg_attr(target_arch = "wasm32", export_name = "mod")]
pub extern "C" fn modulo(x: f64, y: f64) -> f64 {
    x - (x / y).floor() * y
}

#[cfg_attr(target_arch = "wasm32", export_name = "inc")]
pub extern "C" fn inc(x: f64) -> f64 {
    x + 1.0
}

#[cfg_attr(target_arch = "wasm32", export_name = "dec")]
pub extern "C" fn dec(x: f64) -> f64 {
    x - 1.0
}

/// Factorial of the integer part of `x`.
///
/// Negative input gives NaN. Above 170 the product overflows to infinity.
#[cfg_attr(target_arch = "wasm32", export_name = "factorial")]
pub extern "C" fn factorial(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x > 170.0 {
        return f64::INFINITY;
    }
    let n = x.floor() as u32;
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

#[cfg_attr(target_arch = "wasm32", export_name = "sin")]
pub extern "C" fn sine(radians: f64) -> f64 {
    libm::sin(radians)
}

#[cfg_attr(target_arch = "wasm32", export_name = "cos")]
pub extern "C" fn cosine(radians: f64) -> f64 {
    libm::cos(radians)
}

#[cfg_attr(target_arch = "wasm32", export_name = "tan")]
pub extern "C" fn tangent(radians: f64) -> f64 {
    libm::tan(radians)
}

#[cfg_attr(target_arch = "wasm32", export_name = "asin")]
pub extern "C" fn arcsine(x: f64) -> f64 {
    libm::asin(x)
}

#[cfg_attr(target_arch = "wasm32", export_name = "acos")]
pub extern "C" fn arccosine(x: f64) -> f64 {
    libm::acos(x)
}

#[cfg_attr(target_arch = "wasm32", export_name = "atan")]
pub extern "C" fn arctangent(x: f64) -> f64 {
    libm::atan(x)
}

#[cfg_attr(target_arch = "wasm32", export_name = "exp")]
pub extern "C" fn exponential(x: f64) -> f64 {
    libm::exp(x)
}

#[cfg_attr(target_arch = "wasm32", export_name = "ln")]
pub extern "C" fn natural_log(x: f64) -> f64 {
    libm::log(x)
}
