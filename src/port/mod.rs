//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!        CLI / HTTP                    (inbound adapters)
//!            │
//!            ▼
//!   ┌─────────────────────┐
//!   │  OpportunityQuery   │            inbound port
//!   ├─────────────────────┤
//!   │ Application + Domain│
//!   ├─────────────────────┤
//!   │ MarketSource        │            outbound ports
//!   │ SemanticMatcher     │
//!   │ Llm                 │
//!   └─────────────────────┘
//!            │
//!            ▼
//!   Kalshi / Polymarket / LLM          (outbound adapters)
//! ```

pub mod inbound;
pub mod outbound;
