// List operations

use super::{Builtin, Category, Emit, ParamType, Returns};
use crate::types::CrunchType::{FloatList, Int, Float};

pub(crate) fn builtins() -> Vec<Builtin> {
    use ParamType::{Expr, Int as I, List, VarName};
    let c = Category::Lists;

    // Reductions over a single list
    let reductions = [
        ("mean", "mean({0})"),
        ("median", "median({0})"),
        ("sum", "sum({0})"),
        ("prod", "prod({0})"),
        ("std_dev", "stdDev({0})"),
        ("variance", "variance({0})"),
    ];

    let mut all = vec![
        Builtin::call(c, "dim", "dim({0})", Int).param("lst", List),
        Builtin::call(c, "augment", "augment({0},{1})", FloatList)
            .param("lst1", List)
            .param("lst2", List)
            .returning_same_as(0),
        Builtin::call(c, "seq", "seq({0},{1},{2},{3},{4})", FloatList)
            .param("expr", Expr)
            .param("var", VarName)
            .param("start", I)
            .param("end", I)
            .param_default("step", I, "1"),
        Builtin::call(c, "cum_sum", "cumSum({0})", FloatList)
            .param("lst", List)
            .returning_same_as(0),
        Builtin::call(c, "delta_list", "ΔList({0})", FloatList)
            .param("lst", List)
            .returning_same_as(0),
    ];

    all.extend(
        reductions
            .iter()
            .map(|&(name, template)| Builtin::call(c, name, template, Float).param("lst", List)),
    );

    all.extend([
        Builtin::new(c, "sort_up", Returns::SameAs(0), Emit::Sort("SortA({0})")).param("lst", List),
        Builtin::new(c, "sort_down", Returns::SameAs(0), Emit::Sort("SortD({0})")).param("lst", List),
        Builtin::call(c, "min_val", "min({0})", Float).param("lst", List),
        Builtin::call(c, "max_val", "max({0})", Float).param("lst", List),
    ]);
    all
}
