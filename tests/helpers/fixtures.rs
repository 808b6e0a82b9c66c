//! Mapping table fixtures shared by the integration tests.

use intermap::{MappingReader, MappingTree};
use once_cell::sync::Lazy;

/// A small slice of a game's mappings in tiny v1.
pub const GAME_V1: &str = "v1\tnamed\tintermediary
# INTERMEDIARY-COUNTER class 5
CLASS\tcom/example/Entity\tnet/minecraft/class_1297
CLASS\tcom/example/LivingEntity\tnet/minecraft/class_1309
CLASS\tcom/example/Tickable\tnet/minecraft/class_3000
CLASS\tcom/example/World\tnet/minecraft/class_1937
CLASS\tcom/example/Entity$RemovalReason\tnet/minecraft/class_1297$class_5529
METHOD\tcom/example/Entity\t()V\ttick\tmethod_5773
METHOD\tcom/example/Entity\t(Lcom/example/World;)V\tsetWorld\tmethod_5814
METHOD\tcom/example/Entity\t(Lcom/example/Entity$RemovalReason;)V\tremove\tmethod_5650
METHOD\tcom/example/LivingEntity\t()F\tgetHealth\tmethod_6032
METHOD\tcom/example/LivingEntity\t(F)V\tsetHealth\tmethod_6033
METHOD\tcom/example/Tickable\t()Z\tshouldTick\tmethod_3001
FIELD\tcom/example/Entity\tLcom/example/World;\tworld\tfield_6002
FIELD\tcom/example/LivingEntity\tF\thealth\tfield_6012
";

/// The same entities as [`GAME_V1`] in tiny v2, with the extras v2 allows.
pub const GAME_V2: &str = "tiny\t2\t0\tnamed\tintermediary
c\tcom/example/Entity\tnet/minecraft/class_1297
\tc\tAnything that exists in a world.
\tm\t()V\ttick\tmethod_5773
\tm\t(Lcom/example/World;)V\tsetWorld\tmethod_5814
\t\tp\t1\tworld\t
\tm\t(Lcom/example/Entity$RemovalReason;)V\tremove\tmethod_5650
\tf\tLcom/example/World;\tworld\tfield_6002
c\tcom/example/LivingEntity\tnet/minecraft/class_1309
\tm\t()F\tgetHealth\tmethod_6032
\tm\t(F)V\tsetHealth\tmethod_6033
\t\tp\t1\thealth\t
\t\tv\t2\t4\t-1\told\t
\tf\tF\thealth\tfield_6012
c\tcom/example/Tickable\tnet/minecraft/class_3000
\tm\t()Z\tshouldTick\tmethod_3001
c\tcom/example/World\tnet/minecraft/class_1937
c\tcom/example/Entity$RemovalReason\tnet/minecraft/class_1297$class_5529
";

pub static GAME_TREE: Lazy<MappingTree> =
    Lazy::new(|| MappingReader::read(GAME_V1.as_bytes()).expect("fixture mappings parse"));
