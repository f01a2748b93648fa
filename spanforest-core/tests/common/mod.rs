use spanforest_core::{EdgeId, EngineBuilder, ForestEngine, NodeId, Strategy};

/// Engine holding the triangle A-B, B-C, A-C (unit lengths, that order).
pub struct Triangle {
    pub engine: ForestEngine,
    pub nodes: [NodeId; 3],
    pub ab: EdgeId,
    pub bc: EdgeId,
    pub ac: EdgeId,
}

#[must_use]
pub fn triangle(strategy: Strategy) -> Triangle {
    let mut engine = EngineBuilder::new()
        .with_strategy(strategy)
        .build()
        .expect("default configuration is valid");
    let a = engine.add_node("A").expect("unique label");
    let b = engine.add_node("B").expect("unique label");
    let c = engine.add_node("C").expect("unique label");
    let ab = engine.add_default_edge(a, b).expect("valid edge");
    let bc = engine.add_default_edge(b, c).expect("valid edge");
    let ac = engine.add_default_edge(a, c).expect("valid edge");
    Triangle {
        engine,
        nodes: [a, b, c],
        ab,
        bc,
        ac,
    }
}
