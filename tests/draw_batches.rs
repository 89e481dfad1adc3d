use pretty_assertions::assert_eq;
use prism_renderer::draw::{
    multi_draw_elements_indirect, multi_draw_elements_instanced_base_vertex_base_instance,
    DrawArraysIndirectCommand, DrawBackend, DrawElementsIndirectCommand, DrawElementsType,
    EmulatedDrawUniforms, PrimitiveMode,
};
use prism_renderer::RendererError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Elements { count: i32, base_vertex: i32, base_instance: u32 },
    Indirect(DrawElementsIndirectCommand),
    Noop,
    NoopMulti,
}

#[derive(Default)]
struct Backend {
    calls: Vec<Call>,
}

impl DrawBackend for Backend {
    fn draw_arrays(&mut self, _: PrimitiveMode, _: i32, _: i32) -> Result<(), RendererError> {
        unreachable!()
    }

    fn draw_arrays_instanced(
        &mut self,
        _: PrimitiveMode,
        _: i32,
        _: i32,
        _: i32,
    ) -> Result<(), RendererError> {
        unreachable!()
    }

    fn draw_elements(
        &mut self,
        _: PrimitiveMode,
        _: i32,
        _: DrawElementsType,
        _: usize,
    ) -> Result<(), RendererError> {
        unreachable!()
    }

    fn draw_elements_instanced(
        &mut self,
        _: PrimitiveMode,
        _: i32,
        _: DrawElementsType,
        _: usize,
        _: i32,
    ) -> Result<(), RendererError> {
        unreachable!()
    }

    fn draw_arrays_instanced_base_instance(
        &mut self,
        _: PrimitiveMode,
        _: i32,
        _: i32,
        _: i32,
        _: u32,
    ) -> Result<(), RendererError> {
        unreachable!()
    }

    fn draw_elements_instanced_base_vertex_base_instance(
        &mut self,
        _: PrimitiveMode,
        count: i32,
        _: DrawElementsType,
        _: usize,
        _: i32,
        base_vertex: i32,
        base_instance: u32,
    ) -> Result<(), RendererError> {
        self.calls.push(Call::Elements {
            count,
            base_vertex,
            base_instance,
        });
        Ok(())
    }

    fn draw_arrays_indirect(
        &mut self,
        _: PrimitiveMode,
        _: &DrawArraysIndirectCommand,
    ) -> Result<(), RendererError> {
        unreachable!()
    }

    fn draw_elements_indirect(
        &mut self,
        _: PrimitiveMode,
        _: DrawElementsType,
        command: &DrawElementsIndirectCommand,
    ) -> Result<(), RendererError> {
        self.calls.push(Call::Indirect(*command));
        Ok(())
    }

    fn handle_noop_draw_event(&mut self) -> Result<(), RendererError> {
        self.calls.push(Call::Noop);
        Ok(())
    }

    fn handle_noop_multi_draw_event(&mut self) -> Result<(), RendererError> {
        self.calls.push(Call::NoopMulti);
        Ok(())
    }
}

/// Program exposing all three emulated uniforms; records every write.
#[derive(Default)]
struct Program {
    writes: Vec<(&'static str, i64)>,
}

impl EmulatedDrawUniforms for Program {
    fn has_draw_id_uniform(&self) -> bool {
        true
    }

    fn has_base_vertex_uniform(&self) -> bool {
        true
    }

    fn has_base_instance_uniform(&self) -> bool {
        true
    }

    fn set_draw_id_uniform(&mut self, draw_id: i32) {
        self.writes.push(("draw_id", draw_id.into()));
    }

    fn set_base_vertex_uniform(&mut self, base_vertex: i32) {
        self.writes.push(("base_vertex", base_vertex.into()));
    }

    fn set_base_instance_uniform(&mut self, base_instance: u32) {
        self.writes.push(("base_instance", base_instance.into()));
    }
}

#[test]
fn instanced_batch_skips_empty_draws_and_restores_uniforms() {
    let mut backend = Backend::default();
    let mut program = Program::default();

    multi_draw_elements_instanced_base_vertex_base_instance(
        &mut backend,
        &mut program,
        PrimitiveMode::Triangles,
        &[6, 3, 0],
        DrawElementsType::UnsignedShort,
        &[0, 12, 18],
        &[1, 2, 2],
        &[0, 100, -4],
        &[0, 7, 9],
    )
    .unwrap();

    assert_eq!(
        backend.calls,
        vec![
            Call::Elements {
                count: 6,
                base_vertex: 0,
                base_instance: 0
            },
            Call::Elements {
                count: 3,
                base_vertex: 100,
                base_instance: 7
            },
            Call::Noop,
        ]
    );
    assert_eq!(
        program.writes,
        vec![
            ("draw_id", 0),
            ("base_vertex", 0),
            ("base_instance", 0),
            ("draw_id", 1),
            ("base_vertex", 100),
            ("base_instance", 7),
            // Reset once the batch is done.
            ("draw_id", 0),
            ("base_vertex", 0),
            ("base_instance", 0),
        ]
    );
}

#[test]
fn indirect_batch_reads_records_from_client_bytes() {
    let commands = [
        DrawElementsIndirectCommand {
            count: 3,
            instance_count: 1,
            first_index: 0,
            base_vertex: -2,
            base_instance: 0,
        },
        DrawElementsIndirectCommand {
            count: 6,
            instance_count: 4,
            first_index: 3,
            base_vertex: 5,
            base_instance: 1,
        },
    ];
    // One leading pad word, then tightly packed records.
    let mut buffer = vec![0u8; 4];
    for command in &commands {
        buffer.extend_from_slice(command.as_bytes());
    }

    let mut backend = Backend::default();
    multi_draw_elements_indirect(
        &mut backend,
        PrimitiveMode::Triangles,
        DrawElementsType::UnsignedInt,
        &buffer,
        4,
        2,
        0,
    )
    .unwrap();
    assert_eq!(backend.calls, vec![Call::Indirect(commands[0]), Call::Indirect(commands[1])]);

    let err = multi_draw_elements_indirect(
        &mut backend,
        PrimitiveMode::Triangles,
        DrawElementsType::UnsignedInt,
        &buffer,
        4,
        3,
        0,
    )
    .unwrap_err();
    assert_eq!(
        err,
        RendererError::IndirectBufferOverrun {
            offset: 44,
            size: 20,
            len: 44
        }
    );
}
