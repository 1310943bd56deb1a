// I/O, program control and graphics commands

use super::{Builtin, Category, Emit, ParamType, Returns};
use crate::types::CrunchType;

pub(crate) fn program_control() -> Vec<Builtin> {
    use ParamType::{Any, Int, Str, VarName};
    let c = Category::Io;

    vec![
        Builtin::new(c, "input_int", Returns::Fixed(CrunchType::Int), Emit::Input)
            .param_default("msg", Str, "\"\""),
        Builtin::new(c, "input_str", Returns::Fixed(CrunchType::Str), Emit::Input)
            .param_default("msg", Str, "\"\""),
        Builtin::statement(c, "prompt", "Prompt {*}").variadic("vars", VarName),
        Builtin::statement(c, "disp", "Disp {*}").variadic("args", Any),
        Builtin::statement(c, "output", "Output({0},{1},{2})")
            .param("row", Int)
            .param("col", Int)
            .param("value", Any),
        Builtin::statement(c, "clr_home", "ClrHome"),
        Builtin::statement(c, "pause", "Pause"),
        Builtin::statement(c, "stop", "Stop"),
        Builtin::new(c, "ret", Returns::Fixed(CrunchType::None), Emit::Return).param_default("val", Int, "0"),
        Builtin::new(
            c,
            "call",
            Returns::Fixed(CrunchType::None),
            Emit::Unsupported("call another program by calling its Python function"),
        ),
    ]
}

pub(crate) fn graphics() -> Vec<Builtin> {
    use ParamType::{Bool, Float as F, Str};
    let c = Category::Graphics;
    let toggle = |name, on, off| {
        Builtin::new(c, name, Returns::Fixed(CrunchType::None), Emit::Toggle { on, off }).param("on_or_off", Bool)
    };

    vec![
        Builtin::statement(c, "clr_draw", "ClrDraw"),
        toggle("axes_mode", "AxesOn", "AxesOff"),
        toggle("grid_mode", "GridOn", "GridOff"),
        Builtin::statement(c, "text", "Text({0},{1},{2})")
            .param("x", F)
            .param("y", F)
            .param("value", Str),
        Builtin::statement(c, "line", "Line({0},{1},{2},{3})")
            .param("x1", F)
            .param("y1", F)
            .param("x2", F)
            .param("y2", F),
        Builtin::statement(c, "pt_on", "Pt-On({0},{1})").param("x", F).param("y", F),
        Builtin::statement(c, "pt_off", "Pt-Off({0},{1})").param("x", F).param("y", F),
        Builtin::statement(c, "pt_toggle", "Pt-Change({0},{1})").param("x", F).param("y", F),
        Builtin::statement(c, "circle", "Circle({0},{1},{2})")
            .param("x", F)
            .param("y", F)
            .param("r", F),
        Builtin::statement(c, "shade", "Shade({0},{1})").param("y1", F).param("y2", F),
        toggle("plots_mode", "PlotsOn", "PlotsOff"),
    ]
}
