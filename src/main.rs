mipcheck::entry_point!(engine = mipcheck::engine::TranscriptEngine);
