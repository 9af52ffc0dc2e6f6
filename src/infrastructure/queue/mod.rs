pub mod in_memory_queue;
