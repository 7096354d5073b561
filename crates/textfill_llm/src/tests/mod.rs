mod generation;
mod openai_transport;
