//! Cross-module scenarios: scene graph, collision and movement together
