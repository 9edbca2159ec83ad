use crate::ast::Span;
use crate::error::{CompileError, ErrorKind};
use crate::model::{ResolvedModel, ResolvedType, StructId};

/// Rejects struct definitions that contain themselves, directly or
/// transitively. Containment edges are composition slots and struct-typed
/// fields; the graph is walked once with a three-color DFS over the arena
/// indices, so declaration order and forward references do not matter.
pub fn check_composition_cycles(model: &ResolvedModel) -> Vec<CompileError> {
    let mut errors = vec![];
    let mut state = vec![Color::White; model.structs.len()];
    let mut stack = vec![];

    for id in 0..model.structs.len() {
        if state[id] == Color::White {
            visit(model, StructId(id), &mut state, &mut stack, &mut errors);
        }
    }

    errors
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

fn visit(
    model: &ResolvedModel,
    id: StructId,
    state: &mut [Color],
    stack: &mut Vec<StructId>,
    errors: &mut Vec<CompileError>,
) {
    state[id.0] = Color::Gray;
    stack.push(id);

    for (target, span) in edges(model, id) {
        match state[target.0] {
            Color::White => visit(model, target, state, stack, errors),
            Color::Gray => {
                let start = stack.iter().position(|s| *s == target).unwrap_or(0);
                let mut path: Vec<&str> = stack[start..]
                    .iter()
                    .map(|s| model.struct_def(*s).name.as_str())
                    .collect();
                path.push(model.struct_def(target).name.as_str());
                errors.push(CompileError::new(
                    ErrorKind::CompositionCycle,
                    format!("composition cycle: {}", path.join(" -> ")),
                    &model.struct_def(id).file,
                    span,
                ));
            }
            Color::Black => {}
        }
    }

    stack.pop();
    state[id.0] = Color::Black;
}

/// The containment edges leaving a struct, in declaration order.
fn edges(model: &ResolvedModel, id: StructId) -> Vec<(StructId, Span)> {
    let def = model.struct_def(id);
    let mut out = vec![];
    for field in &def.fields {
        if let ResolvedType::Struct(target) = field.ty {
            out.push((target, field.span.clone()));
        }
    }
    for slot in &def.slots {
        out.push((slot.target, slot.span.clone()));
    }
    out
}
