//! TypeScript rendering.
//!
//! Rendering happens in three layers:
//! 1. `codegen`: registered structs -> TypeScript IR (`types`)
//! 2. `print`: IR -> code strings via the `Emit` trait
//! 3. [`Emitter`]: assembles the module (preamble, structs, helpers,
//!    exports) and runs custom render hooks
//!
//! ## Module Structure
//!
//! - `types`: TypeScript IR (TsType, TsExpr, TsStmt, TsDecl)
//! - `codegen`: StructType -> TsDecl
//! - `print`: the `Emit` trait and its impls
//! - `helpers`: runtime helper source
//! - `indent`: writer used for custom render output

mod codegen;
mod helpers;
mod indent;
mod print;
mod types;

use std::io::{self, Write};

use tracing::debug;

use crate::config::Options;
use crate::error::RenderError;
use crate::registry::{Registry, StructType};
use crate::shape::CustomRenderFn;

pub use codegen::codegen_decl;
pub use helpers::HELPER_NAMES;
pub use indent::IndentWriter;
pub use print::Emit;
pub use types::{
    BinOp, TsClass, TsClassField, TsDecl, TsDeclKind, TsExpr, TsLiteral, TsMethod, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType,
};

/// Renders a registry as one TypeScript (or JavaScript) module.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    registry: &'a Registry,
    options: &'a Options,
}

impl<'a> Emitter<'a> {
    /// `options` may differ from the ones the registry was built with; only
    /// rendering switches are read here.
    pub fn new(registry: &'a Registry, options: &'a Options) -> Self {
        Self { registry, options }
    }

    /// Write the module to `out`.
    ///
    /// Output written before a failing custom render hook stays in `out`.
    pub fn render_to<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        let opts = self.options;
        debug!(
            types = self.registry.len(),
            es6 = opts.es6,
            interface_only = opts.interface_only,
            "Rendering module."
        );

        if opts.es6 {
            out.write_all(b"'use strict';\n")?;
        }

        out.write_all(b"// structs\n")?;
        for st in self.registry.structs() {
            self.render_struct(out, st)?;
        }

        if !opts.no_helpers {
            out.write_all(b"// helpers\n")?;
            let source = helpers::helper_source(opts.es6, opts.indent_unit());
            out.write_all(source.as_bytes())?;
            out.write_all(b"\n")?;
        }

        if !opts.no_exports {
            self.render_exports(out)?;
        }

        debug!(types = self.registry.len(), "Rendered module.");
        Ok(())
    }

    fn render_struct<W: Write>(&self, out: &mut W, st: &StructType) -> Result<(), RenderError> {
        let unit = self.options.indent_unit();
        let decl = codegen_decl(self.registry, self.options, st);
        out.write_all(decl.emit_open(unit).as_bytes())?;

        if !decl.has_body() {
            out.write_all(b"\n")?;
            return Ok(());
        }

        if let Some(hook) = st.rendering.hook() {
            self.render_custom(out, st, hook)?;
        }

        out.write_all(b"}\n\n")?;
        Ok(())
    }

    /// Run a custom render hook inside the body of `st`.
    fn render_custom<W: Write>(
        &self,
        out: &mut W,
        st: &StructType,
        hook: CustomRenderFn,
    ) -> Result<(), RenderError> {
        debug!(name = %st.name, "Running custom render hook.");
        let mut writer = IndentWriter::new(&mut *out, self.options.indent_unit());
        if st.rendering.replaces_members() {
            writer.start_line();
        } else {
            // Blank line after the generated members.
            writer.write_all(b"\n")?;
        }
        hook(&mut writer).map_err(|reason| RenderError::CustomRender {
            type_name: st.name.clone(),
            reason,
        })?;
        if !writer.at_line_start() {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Names listed in the export block.
    fn export_list(&self) -> Vec<&'a str> {
        let mut names = Vec::new();
        if self.options.emits_classes() {
            names.extend(self.registry.structs().iter().map(|st| st.name.as_str()));
        }
        if !self.options.no_helpers {
            names.extend(HELPER_NAMES);
        }
        names
    }

    fn render_exports<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Interfaces are exported inline.
        if self.options.interface_only && self.options.no_helpers {
            return Ok(());
        }

        let unit = self.options.indent_unit();
        out.write_all(b"// exports\n")?;
        if self.options.es6 {
            out.write_all(b"if (typeof exports === 'undefined') var exports = {};\n\n")?;
            for name in self.export_list() {
                writeln!(out, "exports.{name} = {name};")?;
            }
        } else {
            out.write_all(b"export {\n")?;
            for name in self.export_list() {
                writeln!(out, "{unit}{name},")?;
            }
            out.write_all(b"};\n")?;
        }
        Ok(())
    }

    /// Every symbol the rendered module defines: struct names (unless no
    /// declaration is printed for them) followed by helper names.
    pub fn exported_symbols(&self) -> Vec<String> {
        let mut symbols = Vec::new();
        if self.options.emits_classes() || !self.options.es6 {
            symbols.extend(self.registry.structs().iter().map(|st| st.name.clone()));
        }
        if !self.options.no_helpers {
            symbols.extend(HELPER_NAMES.iter().map(|name| (*name).to_string()));
        }
        symbols
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::shape::Reflect;
    use crate::test_fixtures::{Complex, Extended, Failing, Leaf, Replaced, Trailing};
    use indoc::indoc;

    fn render<T: Reflect>(options: Options) -> String {
        let mut registry = Registry::new(options);
        registry.add::<T>().unwrap();
        registry.render_to_string().unwrap()
    }

    fn bare() -> Options {
        Options {
            no_helpers: true,
            no_exports: true,
            ..Options::default()
        }
    }

    #[test]
    fn test_interface_module() {
        let out = render::<Leaf>(Options {
            no_helpers: true,
            ..Options::interfaces()
        });
        let expected = indoc! {"
            // structs
            // shapets:shapets_core::test_fixtures::Leaf
            export interface Leaf {
            \tvalue: string;
            }

        "};
        assert_eq!(out, expected);
    }

    #[test]
    fn test_class_module() {
        let out = render::<Complex>(bare());
        let expected = indoc! {"
            // structs
            // shapets:shapets_core::test_fixtures::Complex
            class Complex {
            \ts: string;
            \ti: number;
            \tf: number;
            \tts: Date | null;
            \tt: Date;
            \to: Other | null;
            \tnno: Other;
            \td: { [key: string]: any };
            \tdp: { [key: string]: any } | null;

            \tconstructor(data?: any) {
            \t\tconst d: any = (data && typeof data === 'object') ? ToObject(data) : {};
            \t\tthis.s = ('s' in d) ? d.s as string : '';
            \t\tthis.i = ('i' in d) ? d.i as number : 0;
            \t\tthis.f = ('f' in d) ? d.f as number : 0;
            \t\tthis.ts = ('ts' in d) ? ParseDate(d.ts) : null;
            \t\tthis.t = ('t' in d) ? ParseDate(d.t) : new Date();
            \t\tthis.o = ('o' in d) ? new Other(d.o) : null;
            \t\tthis.nno = new Other(d.nno);
            \t\tthis.d = ('d' in d) ? d.d as { [key: string]: any } : {};
            \t\tthis.dp = ('dp' in d) ? d.dp as { [key: string]: any } : null;
            \t}

            \ttoObject(): any {
            \t\tconst cfg: any = {};
            \t\tcfg.i = 'number';
            \t\tcfg.f = 'number';
            \t\tcfg.t = 'string';
            \t\treturn ToObject(this, cfg);
            \t}
            }

            // shapets:shapets_core::test_fixtures::Other
            class Other {
            \tt: Date;

            \tconstructor(data?: any) {
            \t\tconst d: any = (data && typeof data === 'object') ? ToObject(data) : {};
            \t\tthis.t = ('t' in d) ? ParseDate(d.t) : new Date();
            \t}

            \ttoObject(): any {
            \t\tconst cfg: any = {};
            \t\tcfg.t = 'string';
            \t\treturn ToObject(this, cfg);
            \t}
            }

        "};
        assert_eq!(out, expected);
    }

    #[test]
    fn test_es6_module() {
        let out = render::<Leaf>(Options {
            es6: true,
            ..Options::default()
        });
        assert!(out.starts_with("'use strict';\n// structs\n"));
        assert!(out.contains(indoc! {"
            class Leaf {
            \tconstructor(data = null) {
            \t\tconst d = (data && typeof data === 'object') ? ToObject(data) : {};
            \t\tthis.value = ('value' in d) ? d.value : '';
            \t}

            \ttoObject() {
        "}));
        assert!(out.contains("// helpers\nconst maxUnixTSInSeconds = 9999999999;\n"));
        assert!(out.ends_with(indoc! {"
            // exports
            if (typeof exports === 'undefined') var exports = {};

            exports.Leaf = Leaf;
            exports.ParseDate = ParseDate;
            exports.ParseNumber = ParseNumber;
            exports.FromArray = FromArray;
            exports.ToObject = ToObject;
        "}));
    }

    #[test]
    fn test_es6_interfaces_print_only_origin() {
        let out = render::<Leaf>(Options {
            es6: true,
            no_helpers: true,
            ..Options::interfaces()
        });
        assert_eq!(
            out,
            "'use strict';\n// structs\n// shapets:shapets_core::test_fixtures::Leaf\n\n"
        );
    }

    #[test]
    fn test_ts_exports_block() {
        let out = render::<Leaf>(Options {
            indent: "  ".to_string(),
            ..Options::default()
        });
        assert!(out.ends_with(indoc! {"
            // exports
            export {
              Leaf,
              ParseDate,
              ParseNumber,
              FromArray,
              ToObject,
            };
        "}));

        // Interfaces are exported inline; only helpers are listed.
        let out = render::<Leaf>(Options::interfaces());
        assert!(out.contains("export interface Leaf {"));
        assert!(out.ends_with(indoc! {"
            export {
            \tParseDate,
            \tParseNumber,
            \tFromArray,
            \tToObject,
            };
        "}));
    }

    #[test]
    fn test_section_order() {
        let out = render::<Leaf>(Options::default());
        let structs = out.find("// structs").unwrap();
        let helpers = out.find("// helpers").unwrap();
        let exports = out.find("// exports").unwrap();
        assert!(structs < helpers && helpers < exports);
    }

    #[test]
    fn test_custom_render_extends_body() {
        let out = render::<Extended>(bare());
        assert!(out.contains(indoc! {"
            \t\treturn ToObject(this, cfg);
            \t}

            \t// custom line one
            \t// custom line two
            }
        "}));
    }

    #[test]
    fn test_custom_render_replaces_body() {
        let out = render::<Replaced>(bare());
        assert!(out.ends_with(indoc! {"
            class Replaced {
            \t// custom line one
            \t// custom line two
            }

        "}));

        let out = render::<Replaced>(Options {
            no_helpers: true,
            ..Options::interfaces()
        });
        assert!(out.contains("export interface Replaced {\n\t// custom line one\n"));
    }

    #[test]
    fn test_custom_render_trailing_newline() {
        let out = render::<Trailing>(bare());
        assert!(out.ends_with("\t}\n\n\t// custom line\n}\n\n"));
        assert!(!out.contains("\n\t\n"));
    }

    #[test]
    fn test_custom_render_failure_is_reported() {
        let mut registry = Registry::new(bare());
        registry.add::<Failing>().unwrap();
        let mut out = Vec::new();
        let err = registry.render_to(&mut out).unwrap_err();
        match &err {
            RenderError::CustomRender { type_name, .. } => assert_eq!(type_name, "Failing"),
            other => unreachable!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("hook exploded"));

        // Everything up to the failure was written.
        let partial = String::from_utf8(out).unwrap();
        assert!(partial.ends_with("\n\t// partial"));
    }

    #[test]
    fn test_exported_symbols() {
        let mut registry = Registry::new(Options::default());
        registry.add::<Leaf>().unwrap();
        let emitter = Emitter::new(&registry, registry.options());
        assert_eq!(
            emitter.exported_symbols(),
            vec!["Leaf", "ParseDate", "ParseNumber", "FromArray", "ToObject"]
        );

        let options = Options {
            es6: true,
            no_helpers: true,
            ..Options::interfaces()
        };
        assert!(Emitter::new(&registry, &options).exported_symbols().is_empty());

        let options = Options {
            no_helpers: true,
            ..Options::interfaces()
        };
        assert_eq!(Emitter::new(&registry, &options).exported_symbols(), vec!["Leaf"]);
    }

    #[test]
    fn test_custom_indent() {
        let out = render::<Leaf>(Options {
            indent: "    ".to_string(),
            ..bare()
        });
        assert!(out.contains("\n    value: string;\n"));
        assert!(out.contains("\n        this.value = ('value' in d) ? d.value as string : '';\n"));
    }
}
