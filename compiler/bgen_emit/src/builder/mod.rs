//! Builder source emission.
//!
//! Renders one `BuilderSpec` into Rust source through a fixed section
//! template. The output is meant to be `include!`d into the module named by
//! the spec's namespace, next to any hand-written `impl` blocks of the same
//! builder.
//!
//! # Sections
//!
//! ```text
//! header        banner, namespace line, doc comment
//! fields        factory, domain rules, one Option<Producer<T>> per member
//! constructors  new(), from_factory(..)
//! setters       with_<member>(value) + with_<member>_fn(producer), per member
//! build         factory → assign normal → push collection items → rules
//! footer        close impl, Default impl
//! ```
//!
//! Members are visited normal first, then collection, each in the spec's
//! name order, so value-equal specs always render byte-identical text.
//!
//! # Validation
//!
//! `BuilderPlan::new` resolves every identifier before a single byte is
//! written. Any `EmitError` therefore means "no text", never "partial text".

use bgen_ir::{BuilderSpec, MemberModel};
use rustc_hash::FxHashMap;

use crate::capacity::estimate_capacity;
use crate::emitter::{Emitter, SourceWriter, StringEmitter};
use crate::ident::{escape, to_snake_case};
use crate::{EmitError, EmitOptions};

/// Backing field holding the instance factory.
pub const FACTORY_FIELD: &str = "factory";
/// Backing field holding the registered domain rules.
pub const DOMAIN_RULES_FIELD: &str = "domain_rules";
/// Prefix of every generated setter.
pub const WITH_PREFIX: &str = "with_";
/// Suffix of the producer-accepting setter.
pub const PRODUCER_SUFFIX: &str = "_fn";

/// Emit the source of one builder.
pub fn emit_builder(spec: &BuilderSpec, options: &EmitOptions) -> Result<String, EmitError> {
    let plan = BuilderPlan::new(spec)?;
    let capacity = estimate_capacity(spec);

    let mut writer = SourceWriter::new(StringEmitter::with_capacity(capacity));
    plan.write(&mut writer, spec, options);
    let text = writer.finish().output();

    tracing::trace!(
        builder = spec.builder_name(),
        members = spec.member_count(),
        estimated = capacity,
        actual = text.len(),
        "emitted builder"
    );

    Ok(text)
}

/// One member with its resolved identifiers.
struct PlannedMember<'a> {
    member: &'a MemberModel,
    /// Backing field and setter parameter (`minimum_price`, `r#type`).
    field: String,
    /// Setter stem without escaping (`minimum_price`, `type`).
    stem: String,
    /// Field access on the target instance (`MinimumPrice`, `r#type`).
    access: String,
}

impl PlannedMember<'_> {
    /// The value setter and the producer setter, in that order.
    fn setters(&self) -> [String; 2] {
        let setter = format!("{WITH_PREFIX}{}", self.stem);
        let producer_setter = format!("{setter}{PRODUCER_SUFFIX}");
        [setter, producer_setter]
    }
}

/// Validated identifiers for one spec.
struct BuilderPlan<'a> {
    builder: &'a str,
    target: &'a str,
    members: Vec<PlannedMember<'a>>,
}

impl<'a> BuilderPlan<'a> {
    fn new(spec: &'a BuilderSpec) -> Result<Self, EmitError> {
        let builder = spec.builder_name();
        if builder.is_empty() {
            return Err(EmitError::EmptyBuilderName);
        }
        if escape(builder).as_deref() != Some(builder) {
            return Err(EmitError::InvalidBuilderName {
                name: builder.to_string(),
            });
        }
        let target = spec.target_type_full_name();
        if target.trim().is_empty() {
            return Err(EmitError::EmptyTargetName);
        }

        let mut members = Vec::with_capacity(spec.member_count());
        let mut fields: FxHashMap<String, &str> = FxHashMap::default();
        let mut methods: FxHashMap<String, &str> = FxHashMap::default();

        for (index, member) in spec.all_members().enumerate() {
            let planned = plan_member(index, member)?;
            if planned.field == FACTORY_FIELD || planned.field == DOMAIN_RULES_FIELD {
                return Err(EmitError::ReservedField {
                    member: member.name().to_string(),
                    field: planned.field,
                });
            }
            if let Some(first) = fields.insert(planned.field.clone(), member.name()) {
                return Err(EmitError::DuplicateField {
                    first: first.to_string(),
                    second: member.name().to_string(),
                    field: planned.field,
                });
            }
            for method in planned.setters() {
                if let Some(first) = methods.insert(method.clone(), member.name()) {
                    return Err(EmitError::DuplicateMethod {
                        first: first.to_string(),
                        second: member.name().to_string(),
                        method,
                    });
                }
            }
            members.push(planned);
        }

        Ok(BuilderPlan {
            builder,
            target,
            members,
        })
    }

    fn write<E: Emitter>(
        &self,
        w: &mut SourceWriter<E>,
        spec: &BuilderSpec,
        options: &EmitOptions,
    ) {
        self.write_header(w, spec, options);
        self.write_fields(w, options);
        w.blank_line();
        w.line(&format!("impl {} {{", self.builder));
        w.indent();
        self.write_constructors(w, options);
        for member in &self.members {
            self.write_setters(w, member);
        }
        self.write_build(w, options);
        w.dedent();
        w.line("}");
        self.write_footer(w);
    }

    fn write_header<E: Emitter>(
        &self,
        w: &mut SourceWriter<E>,
        spec: &BuilderSpec,
        options: &EmitOptions,
    ) {
        w.line("// <auto-generated>");
        w.line(&options.banner());
        w.line("// </auto-generated>");
        let namespace = spec.builder_namespace();
        if namespace.is_empty() {
            w.line("// namespace: (root)");
        } else {
            w.line(&format!("// namespace: {namespace}"));
        }
        w.blank_line();
        w.line(&format!("/// Builder for `{}`.", self.target));
    }

    fn write_fields<E: Emitter>(&self, w: &mut SourceWriter<E>, options: &EmitOptions) {
        let support = &options.support_module;
        w.block(&format!("pub struct {} {{", self.builder), "}", |w| {
            w.line(&format!("{FACTORY_FIELD}: Box<dyn Fn() -> {}>,", self.target));
            w.line(&format!(
                "{DOMAIN_RULES_FIELD}: {support}::DomainRules<{}>,",
                self.target
            ));
            for planned in &self.members {
                w.line(&format!(
                    "{}: Option<{support}::Producer<{}>>,",
                    planned.field,
                    planned.member.type_name()
                ));
            }
        });
    }

    fn write_constructors<E: Emitter>(&self, w: &mut SourceWriter<E>, options: &EmitOptions) {
        let target = self.target;
        w.line("/// Creates a builder that starts from `Default::default()`.");
        w.block("pub fn new() -> Self {", "}", |w| {
            w.line(&format!("Self::from_factory(<{target} as Default>::default)"));
        });
        w.blank_line();
        w.line("/// Creates a builder that starts from instances produced by `factory`.");
        w.block(
            &format!("pub fn from_factory(factory: impl Fn() -> {target} + 'static) -> Self {{"),
            "}",
            |w| {
                w.block("Self {", "}", |w| {
                    w.line(&format!("{FACTORY_FIELD}: Box::new(factory),"));
                    w.line(&format!(
                        "{DOMAIN_RULES_FIELD}: {}::DomainRules::new(),",
                        options.support_module
                    ));
                    for planned in &self.members {
                        w.line(&format!("{}: None,", planned.field));
                    }
                });
            },
        );
    }

    fn write_setters<E: Emitter>(&self, w: &mut SourceWriter<E>, planned: &PlannedMember<'_>) {
        let PlannedMember { member, field, .. } = planned;
        let ty = member.type_name();
        let [setter, producer_setter] = planned.setters();

        w.blank_line();
        w.block(
            &format!("pub fn {setter}(self, {field}: {ty}) -> Self {{"),
            "}",
            |w| w.line(&format!("self.{producer_setter}(move || {field})")),
        );
        w.blank_line();
        w.block(
            &format!(
                "pub fn {producer_setter}(mut self, {field}: impl FnOnce() -> {ty} + 'static) -> Self {{"
            ),
            "}",
            |w| {
                w.line(&format!("self.{field} = Some(Box::new({field}));"));
                w.line("self");
            },
        );
    }

    fn write_build<E: Emitter>(&self, w: &mut SourceWriter<E>, options: &EmitOptions) {
        let target = self.target;
        let binding = if self.members.is_empty() {
            "let instance"
        } else {
            "let mut instance"
        };

        w.blank_line();
        w.line(&format!("/// Returns a configured instance of `{target}`."));
        w.block(
            &format!(
                "pub fn build(self) -> Result<{target}, {}::RuleViolation> {{",
                options.support_module
            ),
            "}",
            |w| {
                w.line(&format!("{binding} = (self.{FACTORY_FIELD})();"));
                w.blank_line();
                for planned in &self.members {
                    let open = format!("if let Some(produce) = self.{} {{", planned.field);
                    if planned.member.is_collection() {
                        w.block(&open, "}", |w| {
                            w.block("for item in produce() {", "}", |w| {
                                w.line(&format!("instance.{}.push(item);", planned.access));
                            });
                        });
                    } else {
                        w.block(&open, "}", |w| {
                            w.line(&format!("instance.{} = produce();", planned.access));
                        });
                    }
                    w.blank_line();
                }
                w.line(&format!("self.{DOMAIN_RULES_FIELD}.check(&instance)?;"));
                w.blank_line();
                w.line("Ok(instance)");
            },
        );
    }

    fn write_footer<E: Emitter>(&self, w: &mut SourceWriter<E>) {
        w.blank_line();
        w.block(&format!("impl Default for {} {{", self.builder), "}", |w| {
            w.block("fn default() -> Self {", "}", |w| w.line("Self::new()"));
        });
    }
}

fn plan_member(index: usize, member: &MemberModel) -> Result<PlannedMember<'_>, EmitError> {
    let name = member.name();
    if name.is_empty() {
        return Err(EmitError::EmptyMemberName { index });
    }
    if member.type_name().trim().is_empty() {
        return Err(EmitError::EmptyTypeName {
            member: name.to_string(),
        });
    }
    let invalid = || EmitError::InvalidMemberName {
        member: name.to_string(),
    };
    let access = escape(name).ok_or_else(invalid)?;
    let stem = to_snake_case(name);
    let field = escape(&stem).ok_or_else(invalid)?;

    Ok(PlannedMember {
        member,
        field,
        stem,
        access,
    })
}

/// Emit the once-per-run marker trait declaration.
pub fn emit_builder_marker(options: &EmitOptions) -> String {
    let mut w = SourceWriter::new(StringEmitter::with_capacity(512));
    w.line("// <auto-generated>");
    w.line(&options.banner());
    w.line("// </auto-generated>");
    w.blank_line();
    w.line("/// Marks a hand-written declaration as the builder for `Target`.");
    w.line("///");
    w.line("/// The generator emits the fields and methods of every builder that");
    w.line("/// implements this trait.");
    w.block("pub trait BuilderFor {", "}", |w| {
        w.line("/// The data type the builder produces.");
        w.line("type Target;");
    });
    w.finish().output()
}
