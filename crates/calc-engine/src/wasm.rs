//! # WebAssembly Backend
//!
//! A [`Backend`] whose functions are exports of an instantiated module.
//!
//! ## Export Binding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Module exports            WasmBackend                                  │
//! │  ──────────────            ───────────                                  │
//! │  add sub mul div power ──► required, (f64, f64) → f64                   │
//! │  inc dec factorial     ──► required, f64 → f64                          │
//! │  mod                   ──► optional, falls back to floor_mod            │
//! │  sin cos tan asin      ──► optional, falls back to std f64 methods      │
//! │  acos atan exp ln                                                       │
//! │                                                                         │
//! │  A missing required export fails the whole load.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use calc_core::dispatch::{floor_mod, BackendResult};
use calc_core::Backend;
use tracing::debug;
use wasmer::{imports, Instance, Module, Store, TypedFunction};

use crate::error::{EngineError, EngineResult};

type BinaryFn = TypedFunction<(f64, f64), f64>;
type UnaryFn = TypedFunction<f64, f64>;

/// Required exports.
struct Required {
    add: BinaryFn,
    sub: BinaryFn,
    mul: BinaryFn,
    div: BinaryFn,
    power: BinaryFn,
    inc: UnaryFn,
    dec: UnaryFn,
    factorial: UnaryFn,
}

/// Optional exports; `None` means the host fallback is used.
#[derive(Default)]
struct Optional {
    modulo: Option<BinaryFn>,
    sin: Option<UnaryFn>,
    cos: Option<UnaryFn>,
    tan: Option<UnaryFn>,
    exp: Option<UnaryFn>,
    ln: Option<UnaryFn>,
    asin: Option<UnaryFn>,
    acos: Option<UnaryFn>,
    atan: Option<UnaryFn>,
}

/// An instantiated numeric module.
pub struct WasmBackend {
    store: Store,
    required: Required,
    optional: Optional,
    _instance: Instance,
}

impl WasmBackend {
    /// Compiles and instantiates a module from its bytes.
    ///
    /// Accepts binary WebAssembly or WAT text.
    ///
    /// ## Errors
    /// - `Compile` for invalid bytes
    /// - `Instantiate` if the module needs imports
    /// - `MissingExport` if a required function is absent or mistyped
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> EngineResult<Self> {
        let mut store = Store::default();
        let module = Module::new(&store, bytes)?;
        let instance = Instance::new(&mut store, &module, &imports! {})?;

        let exports = &instance.exports;
        let binary = |name: &'static str| {
            exports
                .get_typed_function::<(f64, f64), f64>(&store, name)
                .map_err(|source| EngineError::MissingExport { name, source })
        };
        let unary = |name: &'static str| {
            exports
                .get_typed_function::<f64, f64>(&store, name)
                .map_err(|source| EngineError::MissingExport { name, source })
        };

        let required = Required {
            add: binary("add")?,
            sub: binary("sub")?,
            mul: binary("mul")?,
            div: binary("div")?,
            power: binary("power")?,
            inc: unary("inc")?,
            dec: unary("dec")?,
            factorial: unary("factorial")?,
        };

        let optional = Optional {
            modulo: binary("mod").ok(),
            sin: unary("sin").ok(),
            cos: unary("cos").ok(),
            tan: unary("tan").ok(),
            exp: unary("exp").ok(),
            ln: unary("ln").ok(),
            asin: unary("asin").ok(),
            acos: unary("acos").ok(),
            atan: unary("atan").ok(),
        };

        let backend = WasmBackend {
            store,
            required,
            optional,
            _instance: instance,
        };
        debug!(optional = ?backend.optional_exports(), "Numeric module instantiated");
        Ok(backend)
    }

    /// Names of the optional exports the module provides.
    pub fn optional_exports(&self) -> Vec<&'static str> {
        let o = &self.optional;
        [
            ("mod", o.modulo.is_some()),
            ("sin", o.sin.is_some()),
            ("cos", o.cos.is_some()),
            ("tan", o.tan.is_some()),
            ("exp", o.exp.is_some()),
            ("ln", o.ln.is_some()),
            ("asin", o.asin.is_some()),
            ("acos", o.acos.is_some()),
            ("atan", o.atan.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl fmt::Debug for WasmBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasmBackend")
            .field("optional_exports", &self.optional_exports())
            .finish_non_exhaustive()
    }
}

fn call_binary(
    store: &mut Store,
    func: &BinaryFn,
    function: &'static str,
    x: f64,
    y: f64,
) -> BackendResult {
    func.call(store, x, y)
        .map_err(|source| EngineError::Call { function, source }.into())
}

fn call_unary(store: &mut Store, func: &UnaryFn, function: &'static str, x: f64) -> BackendResult {
    func.call(store, x)
        .map_err(|source| EngineError::Call { function, source }.into())
}

fn call_optional(
    store: &mut Store,
    func: Option<&UnaryFn>,
    function: &'static str,
    x: f64,
    fallback: fn(f64) -> f64,
) -> BackendResult {
    match func {
        Some(func) => call_unary(store, func, function, x),
        None => Ok(fallback(x)),
    }
}

impl Backend for WasmBackend {
    fn add(&mut self, x: f64, y: f64) -> BackendResult {
        call_binary(&mut self.store, &self.required.add, "add", x, y)
    }

    fn sub(&mut self, x: f64, y: f64) -> BackendResult {
        call_binary(&mut self.store, &self.required.sub, "sub", x, y)
    }

    fn mul(&mut self, x: f64, y: f64) -> BackendResult {
        call_binary(&mut self.store, &self.required.mul, "mul", x, y)
    }

    fn div(&mut self, x: f64, y: f64) -> BackendResult {
        call_binary(&mut self.store, &self.required.div, "div", x, y)
    }

    fn power(&mut self, x: f64, y: f64) -> BackendResult {
        call_binary(&mut self.store, &self.required.power, "power", x, y)
    }

    fn inc(&mut self, x: f64) -> BackendResult {
        call_unary(&mut self.store, &self.required.inc, "inc", x)
    }

    fn dec(&mut self, x: f64) -> BackendResult {
        call_unary(&mut self.store, &self.required.dec, "dec", x)
    }

    fn factorial(&mut self, x: f64) -> BackendResult {
        call_unary(&mut self.store, &self.required.factorial, "factorial", x)
    }

    fn modulo(&mut self, x: f64, y: f64) -> BackendResult {
        match &self.optional.modulo {
            Some(func) => call_binary(&mut self.store, func, "mod", x, y),
            None => Ok(floor_mod(x, y)),
        }
    }

    fn sin(&mut self, radians: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.sin.as_ref(), "sin", radians, f64::sin)
    }

    fn cos(&mut self, radians: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.cos.as_ref(), "cos", radians, f64::cos)
    }

    fn tan(&mut self, radians: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.tan.as_ref(), "tan", radians, f64::tan)
    }

    fn exp(&mut self, x: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.exp.as_ref(), "exp", x, f64::exp)
    }

    fn ln(&mut self, x: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.ln.as_ref(), "ln", x, f64::ln)
    }

    fn asin(&mut self, x: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.asin.as_ref(), "asin", x, f64::asin)
    }

    fn acos(&mut self, x: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.acos.as_ref(), "acos", x, f64::acos)
    }

    fn atan(&mut self, x: f64) -> BackendResult {
        call_optional(&mut self.store, self.optional.atan.as_ref(), "atan", x, f64::atan)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use calc_core::{BackendHandle, CoreError, Dispatcher, RejectionKind};

    pub(crate) const ADD: &str = r#"
        (func (export "add") (param f64 f64) (result f64)
          local.get 0 local.get 1 f64.add)"#;

    const ADD_TRAP: &str = r#"
        (func (export "add") (param f64 f64) (result f64)
          unreachable)"#;

    /// Every required export except `add`.
    pub(crate) const REQUIRED_REST: &str = r#"
        (func (export "sub") (param f64 f64) (result f64)
          local.get 0 local.get 1 f64.sub)
        (func (export "mul") (param f64 f64) (result f64)
          local.get 0 local.get 1 f64.mul)
        (func (export "div") (param f64 f64) (result f64)
          local.get 0 local.get 1 f64.div)
        (func (export "power") (param $x f64) (param $y f64) (result f64)
          (local $r f64)
          (local.set $r (f64.const 1))
          (block $done
            (loop $next
              (br_if $done (f64.le (local.get $y) (f64.const 0)))
              (local.set $r (f64.mul (local.get $r) (local.get $x)))
              (local.set $y (f64.sub (local.get $y) (f64.const 1)))
              (br $next)))
          (local.get $r))
        (func (export "inc") (param f64) (result f64)
          local.get 0 f64.const 1 f64.add)
        (func (export "dec") (param f64) (result f64)
          local.get 0 f64.const 1 f64.sub)
        (func (export "factorial") (param $n f64) (result f64)
          (local $r f64)
          (local.set $r (f64.const 1))
          (block $done
            (loop $next
              (br_if $done (f64.le (local.get $n) (f64.const 1)))
              (local.set $r (f64.mul (local.get $r) (local.get $n)))
              (local.set $n (f64.sub (local.get $n) (f64.const 1)))
              (br $next)))
          (local.get $r))"#;

    pub(crate) fn module(add: &str, extra: &str) -> String {
        format!("(module {add} {REQUIRED_REST} {extra})")
    }

    fn backend(extra: &str) -> WasmBackend {
        WasmBackend::from_bytes(module(ADD, extra)).unwrap()
    }

    #[test]
    fn test_required_exports() {
        let mut b = backend("");
        assert_eq!(b.add(2.0, 3.0).unwrap(), 5.0);
        assert_eq!(b.sub(2.0, 3.0).unwrap(), -1.0);
        assert_eq!(b.mul(2.0, 3.0).unwrap(), 6.0);
        assert_eq!(b.div(3.0, 2.0).unwrap(), 1.5);
        assert_eq!(b.power(2.0, 10.0).unwrap(), 1024.0);
        assert_eq!(b.inc(1.0).unwrap(), 2.0);
        assert_eq!(b.dec(1.0).unwrap(), 0.0);
        assert_eq!(b.factorial(5.0).unwrap(), 120.0);
        assert!(b.optional_exports().is_empty());
    }

    #[test]
    fn test_optional_fallbacks() {
        let mut b = backend("");
        assert_eq!(b.modulo(-7.0, 3.0).unwrap(), 2.0);
        assert_eq!(b.exp(0.0).unwrap(), 1.0);
        assert_eq!(b.atan(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_optional_export_is_preferred() {
        let extra = r#"
            (func (export "sin") (param f64) (result f64) f64.const 42)
            (func (export "mod") (param f64 f64) (result f64) f64.const -1)"#;
        let mut b = backend(extra);
        assert_eq!(b.sin(1.0).unwrap(), 42.0);
        assert_eq!(b.modulo(7.0, 3.0).unwrap(), -1.0);
        assert_eq!(b.optional_exports(), vec!["mod", "sin"]);
    }

    #[test]
    fn test_mistyped_optional_export_is_ignored() {
        let extra = r#"(func (export "ln") (param i32) (result i32) local.get 0)"#;
        let mut b = backend(extra);
        assert_eq!(b.ln(1.0).unwrap(), 0.0);
        assert!(b.optional_exports().is_empty());
    }

    #[test]
    fn test_missing_required_export() {
        let wat = format!("(module {ADD})");
        let err = WasmBackend::from_bytes(wat).unwrap_err();
        assert!(matches!(err, EngineError::MissingExport { name: "sub", .. }));
    }

    #[test]
    fn test_invalid_bytes() {
        let err = WasmBackend::from_bytes(b"not a module").unwrap_err();
        assert!(matches!(err, EngineError::Compile(_)));
    }

    #[test]
    fn test_module_with_imports_fails_to_instantiate() {
        let wat = r#"(module (import "env" "host" (func)))"#;
        let err = WasmBackend::from_bytes(wat).unwrap_err();
        assert!(matches!(err, EngineError::Instantiate(_)));
    }

    #[test]
    fn test_trap_becomes_backend_error() {
        let mut b = WasmBackend::from_bytes(module(ADD_TRAP, "")).unwrap();
        let err = b.add(1.0, 2.0).unwrap_err();
        assert!(err.to_string().contains("`add`"));
    }

    #[test]
    fn test_dispatch_through_module() {
        let dispatcher = Dispatcher::default();
        let mut handle = BackendHandle::Ready(backend(""));

        assert_eq!(dispatcher.evaluate(&mut handle, "add", "2", "3").unwrap().value, 5.0);
        assert_eq!(dispatcher.evaluate(&mut handle, "fact", "5", "").unwrap().value, 120.0);
        assert_eq!(dispatcher.evaluate(&mut handle, "sin", "30", "").unwrap().value, 0.5);
        assert_eq!(dispatcher.evaluate(&mut handle, "exp", "1", "").unwrap().value, 2.718282);
        assert_eq!(dispatcher.evaluate(&mut handle, "atan", "1", "").unwrap().value, 45.0);
        assert_eq!(
            dispatcher.evaluate(&mut handle, "div", "10", "0").unwrap_err(),
            CoreError::Rejected(RejectionKind::DivisionByZero)
        );
    }

    #[test]
    fn test_trap_surfaces_as_computation_error() {
        let dispatcher = Dispatcher::default();
        let backend = WasmBackend::from_bytes(module(ADD_TRAP, "")).unwrap();
        let mut handle = BackendHandle::Ready(backend);

        let err = dispatcher.evaluate(&mut handle, "add", "1", "2").unwrap_err();
        assert!(matches!(err, CoreError::Computation(_)));
    }
}
