mod bit_flag_tests;
mod block_pool_tests;
mod randomized_tests;
mod trait_store_tests;
