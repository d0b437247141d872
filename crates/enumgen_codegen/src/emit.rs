//! C# emission of extension classes.

use enumgen_model::{EnumDescriptor, EnumMember};

use crate::artifact::{hint_name, SourceArtifact};
use crate::plan::{to_bits, ExtensionPlan, FLAGS_SEPARATOR};
use crate::writer::SourceWriter;

/// First line of every generated file.
pub const AUTO_GENERATED_HEADER: &str = "// <auto-generated />";

/// Generates the extension classes for `descriptors`, in input order.
pub fn generate(descriptors: &[EnumDescriptor]) -> String {
    let mut w = SourceWriter::new();
    for (i, descriptor) in descriptors.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        emit_descriptor(&mut w, descriptor);
    }
    w.finish()
}

/// Generates a single descriptor as a named artifact.
pub fn generate_artifact(descriptor: &EnumDescriptor, hint_suffix: &str) -> SourceArtifact {
    SourceArtifact::new(
        hint_name(descriptor, hint_suffix),
        generate(std::slice::from_ref(descriptor)),
    )
}

pub(crate) fn write_preamble(w: &mut SourceWriter) {
    w.line(AUTO_GENERATED_HEADER);
    w.line("#nullable enable");
    w.blank();
}

fn emit_descriptor(w: &mut SourceWriter, descriptor: &EnumDescriptor) {
    let plan = ExtensionPlan::new(descriptor);
    write_preamble(w);

    if let Some(ns) = &descriptor.namespace {
        w.open(&format!("namespace {ns}"));
    }
    for parent in descriptor.parents.iter() {
        let mut header = format!("partial {} {}", parent.keyword, parent.name);
        if !parent.constraints.is_empty() {
            header.push(' ');
            header.push_str(&parent.constraints);
        }
        w.open(&header);
    }

    let ctx = Context::new(&plan);
    let visibility = if descriptor.is_public { "public" } else { "internal" };
    w.open(&format!(
        "{visibility} static partial class {}",
        descriptor.extension_name
    ));

    let mut sections: Vec<fn(&mut SourceWriter, &Context<'_>)> = vec![
        emit_length,
        emit_to_string_fast,
        emit_is_defined,
        emit_is_defined_name,
        emit_get_values,
        emit_get_names,
        emit_try_parse,
    ];
    if descriptor.has_flags {
        sections.push(emit_has_flag_fast);
        sections.push(emit_format_flags);
    }
    if descriptor.is_display_metadata_used() {
        sections.push(emit_to_display_string);
        sections.push(emit_try_parse_display_name);
    }
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        section(w, &ctx);
    }

    w.close();
    for _ in descriptor.parents.iter() {
        w.close();
    }
    if descriptor.namespace.is_some() {
        w.close();
    }
}

/// Per-descriptor names shared by every section.
struct Context<'a> {
    plan: &'a ExtensionPlan<'a>,
    /// The enum type reference, e.g. `global::MyEnums.Colour`.
    ty: String,
    /// The storage keyword, e.g. `int`.
    keyword: &'static str,
}

impl<'a> Context<'a> {
    fn new(plan: &'a ExtensionPlan<'a>) -> Self {
        let descriptor = plan.descriptor();
        Self {
            plan,
            ty: format!("global::{}", descriptor.name),
            keyword: descriptor.underlying_type.keyword(),
        }
    }

    fn member(&self, member: &EnumMember) -> String {
        format!("{}.{}", self.ty, member.name)
    }
}

fn string_literal(text: &str) -> String {
    format!("\"{text}\"")
}

fn ulong_literal(member: &EnumMember) -> String {
    format!("{}UL", to_bits(member.value))
}

fn emit_length(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.line("/// <summary>");
    w.line("/// The number of members in the enum.");
    w.line("/// </summary>");
    w.line(&format!("public const int Length = {};", ctx.plan.members().len()));
}

fn emit_to_string_fast(w: &mut SourceWriter, ctx: &Context<'_>) {
    let fallback = if ctx.plan.descriptor().has_flags {
        "FormatFlags(value)".to_string()
    } else {
        format!("(({})value).ToString()", ctx.keyword)
    };
    w.line(&format!("public static string ToStringFast(this {} value)", ctx.ty));
    w.indent();
    w.line("=> value switch");
    w.open("");
    for member in ctx.plan.distinct_members() {
        w.line(&format!(
            "{} => {},",
            ctx.member(member),
            string_literal(&member.name)
        ));
    }
    w.line(&format!("_ => {fallback},"));
    w.close_with(";");
    w.dedent();
}

fn emit_is_defined(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.line(&format!("public static bool IsDefined({} value)", ctx.ty));
    w.indent();
    w.line("=> value switch");
    w.open("");
    for member in ctx.plan.distinct_members() {
        w.line(&format!("{} => true,", ctx.member(member)));
    }
    w.line("_ => false,");
    w.close_with(";");
    w.dedent();
}

fn emit_is_defined_name(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.line("public static bool IsDefined(string? name)");
    w.indent();
    w.line("=> name switch");
    w.open("");
    for member in ctx.plan.members() {
        w.line(&format!("{} => true,", string_literal(&member.name)));
    }
    w.line("_ => false,");
    w.close_with(";");
    w.dedent();
}

fn emit_get_values(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.open(&format!("public static {}[] GetValues()", ctx.ty));
    w.line(&format!("return new {}[]", ctx.ty));
    w.open("");
    for member in ctx.plan.members() {
        w.line(&format!("{},", ctx.member(member)));
    }
    w.close_with(";");
    w.close();
}

fn emit_get_names(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.open("public static string[] GetNames()");
    w.line("return new string[]");
    w.open("");
    for member in ctx.plan.members() {
        w.line(&format!("{},", string_literal(&member.name)));
    }
    w.close_with(";");
    w.close();
}

fn emit_try_parse(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.open(&format!(
        "public static bool TryParse(string? name, out {} value)",
        ctx.ty
    ));
    if ctx.plan.descriptor().has_flags {
        emit_try_parse_flags_body(w, ctx);
    } else {
        w.open("switch (name)");
        for member in ctx.plan.members() {
            w.line(&format!("case {}:", string_literal(&member.name)));
            w.indent();
            w.line(&format!("value = {};", ctx.member(member)));
            w.line("return true;");
            w.dedent();
        }
        w.line("default:");
        w.indent();
        w.line("value = default;");
        w.line("return false;");
        w.dedent();
        w.close();
    }
    w.close();
}

fn emit_try_parse_flags_body(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.line("value = default;");
    w.open("if (name is null)");
    w.line("return false;");
    w.close();
    w.line("ulong result = 0UL;");
    w.open("foreach (var part in name.Split(','))");
    w.open("switch (part.Trim())");
    for member in ctx.plan.members() {
        w.line(&format!("case {}:", string_literal(&member.name)));
        w.indent();
        w.line(&format!("result |= {};", ulong_literal(member)));
        w.line("break;");
        w.dedent();
    }
    w.line("default:");
    w.indent();
    w.line("return false;");
    w.dedent();
    w.close();
    w.close();
    w.line(&format!(
        "value = ({})unchecked(({})result);",
        ctx.ty, ctx.keyword
    ));
    w.line("return true;");
}

fn emit_has_flag_fast(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.line(&format!(
        "public static bool HasFlagFast(this {ty} value, {ty} flag)",
        ty = ctx.ty
    ));
    w.indent();
    w.line("=> (value & flag) == flag;");
    w.dedent();
}

fn emit_format_flags(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.open(&format!("private static string FormatFlags({} value)", ctx.ty));
    w.line("ulong remaining = unchecked((ulong)value);");
    w.open("if (remaining == 0UL)");
    w.line("return \"0\";");
    w.close();
    w.line("var builder = new global::System.Text.StringBuilder();");
    for member in ctx.plan.distinct_members() {
        if to_bits(member.value) == 0 {
            continue;
        }
        let bits = ulong_literal(member);
        w.open(&format!("if ((remaining & {bits}) == {bits})"));
        append_part(w, &string_literal(&member.name));
        w.line(&format!("remaining &= ~{bits};"));
        w.close();
    }
    w.open("if (remaining != 0UL)");
    append_part(w, &format!("unchecked(({})remaining)", ctx.keyword));
    w.close();
    w.line("return builder.ToString();");
    w.close();
}

fn append_part(w: &mut SourceWriter, expr: &str) {
    w.open("if (builder.Length > 0)");
    w.line(&format!("builder.Append({});", string_literal(FLAGS_SEPARATOR)));
    w.close();
    w.line(&format!("builder.Append({expr});"));
}

fn emit_to_display_string(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.line(&format!(
        "public static string ToDisplayString(this {} value)",
        ctx.ty
    ));
    w.indent();
    w.line("=> value switch");
    w.open("");
    for member in ctx.plan.distinct_members() {
        let text = member
            .option
            .display_name
            .as_deref()
            .unwrap_or(&member.name);
        w.line(&format!("{} => {},", ctx.member(member), string_literal(text)));
    }
    w.line("_ => value.ToStringFast(),");
    w.close_with(";");
    w.dedent();
}

fn emit_try_parse_display_name(w: &mut SourceWriter, ctx: &Context<'_>) {
    w.open(&format!(
        "public static bool TryParseDisplayName(string? name, out {} value)",
        ctx.ty
    ));
    w.open("switch (name)");
    for (display, member) in ctx.plan.display_lookup() {
        w.line(&format!("case {}:", string_literal(display)));
        w.indent();
        w.line(&format!("value = {};", ctx.member(member)));
        w.line("return true;");
        w.dedent();
    }
    w.line("default:");
    w.indent();
    w.line("value = default;");
    w.line("return false;");
    w.dedent();
    w.close();
    w.close();
}
