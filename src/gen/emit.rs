//! Code emitter
//!
//! Renders the IR of a record into Rust source: an inherent size helper and
//! an `Encode` implementation for the encoder, a `Decode` implementation for
//! the decoder. All wire-level detail comes from the op library; this module
//! only lays out the routines around it.

use tracing::debug;

use super::ir::StructOp;
use super::ops::{CodeWriter, GenContext, Place};
use super::GenOptions;

/// Renders the routines requested by `opts` for the record `name`.
#[must_use]
pub fn emit(name: &str, root: &StructOp, opts: &GenOptions) -> String {
    let mut w = CodeWriter::new();
    if opts.encoder {
        emit_encoder(name, root, &opts.runtime_path, &mut w);
    }
    if opts.encoder && opts.decoder {
        w.blank();
    }
    if opts.decoder {
        emit_decoder(name, root, &opts.runtime_path, &mut w);
    }
    let code = w.finish();
    debug!(
        record = name,
        encoder = opts.encoder,
        decoder = opts.decoder,
        bytes = code.len(),
        "emitted"
    );
    code
}

fn emit_encoder(name: &str, root: &StructOp, rt: &str, w: &mut CodeWriter) {
    let mut cx = GenContext::new(rt);
    let this = Place::Owned("self".to_owned());

    // pass 1: payload size, summed bottom-up
    w.open(format!("impl {name} {{"));
    w.line("#[doc(hidden)]");
    w.open("fn rlp_payload_len(&self) -> usize {");
    let terms: Vec<String> = root
        .wire_fields()
        .map(|(member, op)| cx.size_expr(op, &this.field(member)))
        .collect();
    if terms.is_empty() {
        w.line("0");
    } else {
        w.line("let mut len = 0;");
        for term in terms {
            w.line(format!("len += {term};"));
        }
        w.line("len");
    }
    w.close("}");
    w.close("}");
    w.blank();

    // pass 2: list header, then every field in declaration order
    w.open(format!("impl {rt}::Encode for {name} {{"));
    w.open("fn encoded_len(&self) -> usize {");
    w.line(format!("{rt}::header::list_len(self.rlp_payload_len())"));
    w.close("}");
    w.blank();
    w.open(format!(
        "fn write_to<U: {rt}::Target>(&self, buf: &mut U) -> {rt}::EncodeResult<()> {{"
    ));
    if root.wire_fields().any(|(_, op)| op.nests_lists()) {
        // nested list payloads are measured once, ahead of their headers
        w.line(format!("let mut sizes = {rt}::header::ListSizes::new();"));
        w.line("let mut len = 0;");
        for (member, op) in root.wire_fields() {
            cx.record_stmts(op, &this.field(member), "len", w);
        }
        w.line(format!("{rt}::Header::list(len).write_to(buf);"));
    } else {
        w.line(format!("{rt}::Header::list(self.rlp_payload_len()).write_to(buf);"));
    }
    for (member, op) in root.wire_fields() {
        cx.write_stmts(op, &this.field(member), w);
    }
    w.line("Ok(())");
    w.close("}");
    w.close("}");
}

fn emit_decoder(name: &str, root: &StructOp, rt: &str, w: &mut CodeWriter) {
    let mut cx = GenContext::new(rt);
    w.open(format!("impl {rt}::Decode for {name} {{"));
    w.open(format!(
        "fn parse(p: &mut {rt}::ByteParser<'_>) -> {rt}::DecodeResult<Self> {{"
    ));
    let value = cx.read_fields(root, w);
    w.line(format!("Ok({value})"));
    w.close("}");
    w.close("}");
}
